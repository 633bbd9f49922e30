use super::*;
use crate::config::LlmProfile;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: GeminiFunctionCall,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    image_config: Option<GeminiImageConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiImageConfig {
    #[serde(rename = "aspectRatio")]
    aspect_ratio: String,
    #[serde(rename = "imageSize")]
    image_size: String,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "functionDeclarations")]
    function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct GeminiFunctionDeclaration {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

pub struct GeminiClient {
    client: Client,
    profile: LlmProfile,
}

impl GeminiClient {
    pub fn new(profile: LlmProfile) -> Self {
        Self {
            client: Client::new(),
            profile,
        }
    }

    /// Split the conversation into the systemInstruction payload and the
    /// ordered user/model contents. Gemini takes the system text out of band.
    fn convert_messages(messages: Vec<Message>) -> (Option<GeminiSystemInstruction>, Vec<GeminiContent>) {
        let mut system_text = String::new();
        let mut contents = Vec::new();

        for msg in messages {
            match msg.role {
                Role::System => {
                    if !system_text.is_empty() {
                        system_text.push('\n');
                    }
                    system_text.push_str(&msg.content);
                }
                Role::User | Role::Model => {
                    let role = if msg.role == Role::User { "user" } else { "model" };
                    contents.push(GeminiContent {
                        role: role.to_string(),
                        parts: vec![GeminiPart::Text { text: msg.content }],
                    });
                }
            }
        }

        let system_instruction = if system_text.is_empty() {
            None
        } else {
            Some(GeminiSystemInstruction {
                parts: vec![GeminiPart::Text { text: system_text }],
            })
        };

        (system_instruction, contents)
    }

    fn convert_tools(available_tools: Vec<ToolDefinition>) -> Option<Vec<GeminiTool>> {
        if available_tools.is_empty() {
            return None;
        }
        Some(vec![GeminiTool {
            function_declarations: available_tools
                .into_iter()
                .map(|tool| GeminiFunctionDeclaration {
                    name: tool.name,
                    description: tool.description,
                    parameters: tool.parameters,
                })
                .collect(),
        }])
    }

    fn response_to_chat(response: GeminiResponse) -> Result<ChatResponse, LlmError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Api("No response from Gemini".to_string()))?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();

        for part in candidate.content.parts {
            match part {
                GeminiPart::Text { text } => content.push_str(&text),
                GeminiPart::FunctionCall { function_call } => {
                    tool_calls.push(ToolCall {
                        id: uuid::Uuid::new_v4().to_string(),
                        name: function_call.name,
                        args: function_call.args,
                    });
                }
                GeminiPart::InlineData { .. } => {}
            }
        }

        Ok(ChatResponse { content, tool_calls })
    }

    fn collect_data_uris(response: GeminiResponse) -> Vec<String> {
        let mut images = Vec::new();
        if let Some(candidate) = response.candidates.into_iter().next() {
            for part in candidate.content.parts {
                if let GeminiPart::InlineData { inline_data } = part {
                    images.push(format!(
                        "data:{};base64,{}",
                        inline_data.mime_type, inline_data.data
                    ));
                }
            }
        }
        images
    }

    async fn post(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse, LlmError> {
        if self.profile.api_key.is_empty() {
            return Err(LlmError::Config(format!(
                "{} is not set",
                crate::config::API_KEY_ENV
            )));
        }

        let endpoint = format!(
            "{}:generateContent?key={}",
            self.profile.model_url(model),
            self.profile.api_key
        );

        let response = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn send_message_with_tools(
        &self,
        messages: Vec<Message>,
        available_tools: Vec<ToolDefinition>,
    ) -> Result<ChatResponse, LlmError> {
        let (system_instruction, contents) = Self::convert_messages(messages);

        let request = GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.profile.temperature,
                max_output_tokens: self.profile.max_tokens,
                image_config: None,
            }),
            tools: Self::convert_tools(available_tools),
        };

        log::debug!(
            "Sending Gemini chat request with {} turns",
            request.contents.len()
        );

        let response = self.post(&self.profile.model, &request).await?;
        Self::response_to_chat(response)
    }

    async fn generate_images(&self, config: &ImageGenConfig) -> Result<Vec<String>, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart::Text {
                    text: config.prompt.clone(),
                }],
            }],
            system_instruction: None,
            generation_config: Some(GeminiGenerationConfig {
                temperature: None,
                max_output_tokens: None,
                image_config: Some(GeminiImageConfig {
                    aspect_ratio: config.aspect_ratio.as_str().to_string(),
                    image_size: config.image_size.as_str().to_string(),
                }),
            }),
            tools: None,
        };

        log::debug!(
            "Sending Gemini image request ({} / {})",
            config.aspect_ratio.as_str(),
            config.image_size.as_str()
        );

        let response = self.post(&self.profile.image_model, &request).await?;
        Ok(Self::collect_data_uris(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_turns_become_system_instruction() {
        let messages = vec![
            Message::new(Role::System, "You are an SRE agent.".to_string()),
            Message::new(Role::User, "Any incidents?".to_string()),
            Message::new(Role::Model, "Checking.".to_string()),
        ];

        let (system, contents) = GeminiClient::convert_messages(messages);

        let system = system.expect("system instruction present");
        assert!(matches!(
            &system.parts[0],
            GeminiPart::Text { text } if text == "You are an SRE agent."
        ));
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
    }

    #[test]
    fn function_calls_are_parsed_from_response() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Checking incidents now." },
                        { "functionCall": { "name": "list_incidents", "args": { "urgency": "high" } } }
                    ]
                }
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let chat = GeminiClient::response_to_chat(response).unwrap();
        assert_eq!(chat.content, "Checking incidents now.");
        assert_eq!(chat.tool_calls.len(), 1);
        assert_eq!(chat.tool_calls[0].name, "list_incidents");
        assert_eq!(chat.tool_calls[0].args["urgency"], "high");
    }

    #[test]
    fn empty_candidates_is_an_api_error() {
        let response: GeminiResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            GeminiClient::response_to_chat(response),
            Err(LlmError::Api(_))
        ));
    }

    #[test]
    fn inline_data_becomes_data_uris() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                }
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let images = GeminiClient::collect_data_uris(response);
        assert_eq!(images, vec!["data:image/png;base64,aGVsbG8=".to_string()]);
    }

    #[test]
    fn image_request_serializes_image_config() {
        let config = GeminiGenerationConfig {
            temperature: None,
            max_output_tokens: None,
            image_config: Some(GeminiImageConfig {
                aspect_ratio: "16:9".to_string(),
                image_size: "1K".to_string(),
            }),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["imageConfig"]["aspectRatio"], "16:9");
        assert_eq!(value["imageConfig"]["imageSize"], "1K");
        assert!(value.get("temperature").is_none());
    }
}
