use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::llm::{self, ChatResponse, Role, ToolCall, ToolResponse};

/// Fixed reply appended when the remote call fails, whatever the cause.
pub const ERROR_REPLY: &str =
    "I encountered an error connecting to the AI service. Please check your network or API key.";

/// Placeholder used when the model returns a reply with no text parts.
const EMPTY_REPLY: &str = "No response generated.";

const GREETING: &str = "Hello! I am your Reliability Engineering Agent. I am connected to the \
Ab Initio ETL Controller and PagerDuty. I can help you check job statuses, investigate graph \
failures, and manage incidents. How can I help you triage today?";

/// One rendered chat turn. Created on every user submission and every
/// completed AI response, never mutated afterwards, kept in memory only.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub tool_calls: Vec<ToolCall>,
    pub tool_responses: Vec<ToolResponse>,
    pub images: Vec<String>,
}

impl ChatMessage {
    fn new(role: Role, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: Utc::now(),
            tool_calls: Vec::new(),
            tool_responses: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: String) -> Self {
        Self::new(Role::Model, content)
    }

    pub fn model_with_tools(content: String, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::new(Role::Model, content)
        }
    }
}

/// Owns the ordered, append-only message history and the turn-taking flow:
/// idle -> awaiting-response on submit, back to idle on response or error.
/// At most one request is in flight; the busy flag rejects overlap.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    busy: bool,
    system_prompt: String,
}

impl ChatSession {
    pub fn new(system_prompt: String) -> Self {
        Self {
            messages: vec![ChatMessage::model(GREETING.to_string())],
            busy: false,
            system_prompt,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Append the user's turn and hand back the full conversation as API
    /// turns (system prompt first). Returns `None` without touching history
    /// when the input is empty after trimming or a request is already
    /// pending.
    pub fn begin_submit(&mut self, input: &str) -> Option<Vec<llm::Message>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.busy {
            tracing::debug!("submission rejected: a response is still pending");
            return None;
        }

        self.messages.push(ChatMessage::user(trimmed.to_string()));
        self.busy = true;

        let mut turns = Vec::with_capacity(self.messages.len() + 1);
        turns.push(llm::Message::new(Role::System, self.system_prompt.clone()));
        for msg in &self.messages {
            turns.push(llm::Message::new(msg.role, msg.content.clone()));
        }
        Some(turns)
    }

    /// Append the model's reply, including the structured function calls the
    /// API reported, and return to idle.
    pub fn complete(&mut self, response: ChatResponse) {
        let content = if response.content.trim().is_empty() {
            EMPTY_REPLY.to_string()
        } else {
            response.content
        };
        self.messages
            .push(ChatMessage::model_with_tools(content, response.tool_calls));
        self.busy = false;
    }

    /// Append the fixed error reply and return to idle. No retry, no
    /// partial state.
    pub fn fail(&mut self) {
        self.messages.push(ChatMessage::model(ERROR_REPLY.to_string()));
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmClient, LlmError, ImageGenConfig, Message, ToolDefinition};
    use async_trait::async_trait;

    fn session() -> ChatSession {
        ChatSession::new("test prompt".to_string())
    }

    struct CannedClient {
        response: ChatResponse,
    }

    #[async_trait]
    impl LlmClient for CannedClient {
        async fn send_message_with_tools(
            &self,
            _messages: Vec<Message>,
            _available_tools: Vec<ToolDefinition>,
        ) -> Result<ChatResponse, LlmError> {
            Ok(ChatResponse {
                content: self.response.content.clone(),
                tool_calls: self.response.tool_calls.clone(),
            })
        }

        async fn generate_images(
            &self,
            _config: &ImageGenConfig,
        ) -> Result<Vec<String>, LlmError> {
            Err(LlmError::Api("not an image client".to_string()))
        }
    }

    #[test]
    fn empty_input_leaves_history_unchanged() {
        let mut session = session();
        let before = session.messages().len();

        assert!(session.begin_submit("").is_none());
        assert!(session.begin_submit("   \n\t").is_none());

        assert_eq!(session.messages().len(), before);
        assert!(!session.is_busy());
    }

    #[test]
    fn submission_while_pending_is_rejected() {
        let mut session = session();

        assert!(session.begin_submit("first").is_some());
        assert!(session.is_busy());

        let during = session.messages().len();
        assert!(session.begin_submit("second").is_none());
        assert_eq!(session.messages().len(), during);

        // Resolving the pending turn makes submission possible again.
        session.complete(ChatResponse {
            content: "done".to_string(),
            tool_calls: Vec::new(),
        });
        assert!(!session.is_busy());
        assert!(session.begin_submit("second").is_some());
    }

    #[test]
    fn round_trip_appends_user_then_model() {
        let mut session = session();
        let before = session.messages().len();

        let turns = session.begin_submit("list high urgency incidents").unwrap();
        // System prompt leads, the new user turn closes the conversation.
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(
            turns.last().unwrap().content,
            "list high urgency incidents"
        );

        session.complete(ChatResponse {
            content: "Two incidents are open.".to_string(),
            tool_calls: vec![ToolCall {
                id: "call-1".to_string(),
                name: "list_incidents".to_string(),
                args: serde_json::json!({ "urgency": "high" }),
            }],
        });

        assert_eq!(session.messages().len(), before + 2);
        let user = &session.messages()[before];
        let model = &session.messages()[before + 1];
        assert_eq!(user.role, Role::User);
        assert_eq!(model.role, Role::Model);
        assert_eq!(model.tool_calls.len(), 1);
        assert_eq!(model.tool_calls[0].name, "list_incidents");
        assert!(!session.is_busy());
    }

    #[test]
    fn failure_appends_exactly_one_error_reply() {
        let mut session = session();
        let before = session.messages().len();

        session.begin_submit("check graph_daily_sales_agg.mp").unwrap();
        session.fail();

        assert_eq!(session.messages().len(), before + 2);
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Model);
        assert_eq!(last.content, ERROR_REPLY);
        assert!(!session.is_busy());
    }

    #[test]
    fn blank_model_text_gets_placeholder() {
        let mut session = session();
        session.begin_submit("hello").unwrap();
        session.complete(ChatResponse {
            content: "  ".to_string(),
            tool_calls: Vec::new(),
        });
        assert_eq!(session.messages().last().unwrap().content, EMPTY_REPLY);
    }

    #[test]
    fn full_turn_through_the_client_seam() {
        let client = CannedClient {
            response: ChatResponse {
                content: "graph_daily_sales_agg.mp failed at 14:05.".to_string(),
                tool_calls: Vec::new(),
            },
        };
        let mut session = session();

        let turns = session.begin_submit("status of the sales graph?").unwrap();
        let response = tokio_test::block_on(
            client.send_message_with_tools(turns, crate::mcp::McpCatalog::default().tool_definitions()),
        )
        .unwrap();
        session.complete(response);

        assert!(session
            .messages()
            .last()
            .unwrap()
            .content
            .contains("failed at 14:05"));
    }
}
