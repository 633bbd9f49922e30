use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
    System,
}

/// A single conversation turn as sent to the remote API.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

// Tool-related types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub args: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub result: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    Square,
    Portrait2x3,
    Landscape3x2,
    Portrait3x4,
    Landscape4x3,
    Portrait9x16,
    Widescreen,
    Cinematic,
}

impl AspectRatio {
    /// Wire value expected by the image endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait2x3 => "2:3",
            Self::Landscape3x2 => "3:2",
            Self::Portrait3x4 => "3:4",
            Self::Landscape4x3 => "4:3",
            Self::Portrait9x16 => "9:16",
            Self::Widescreen => "16:9",
            Self::Cinematic => "21:9",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Square => "Square (1:1)",
            Self::Portrait2x3 => "Portrait (2:3)",
            Self::Landscape3x2 => "Landscape (3:2)",
            Self::Portrait3x4 => "Portrait (3:4)",
            Self::Landscape4x3 => "Landscape (4:3)",
            Self::Portrait9x16 => "Tall (9:16)",
            Self::Widescreen => "Widescreen (16:9)",
            Self::Cinematic => "Cinematic (21:9)",
        }
    }

    /// Ratios offered in the studio form.
    pub const SUPPORTED: &'static [Self] = &[Self::Square, Self::Widescreen];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    Standard1K,
    Large2K,
    Ultra4K,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard1K => "1K",
            Self::Large2K => "2K",
            Self::Ultra4K => "4K",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard1K => "Standard (1K)",
            Self::Large2K => "Large (2K)",
            Self::Ultra4K => "Ultra (4K)",
        }
    }

    pub const SUPPORTED: &'static [Self] = &[Self::Standard1K];
}

/// Ephemeral image request, rebuilt for every generation.
#[derive(Debug, Clone)]
pub struct ImageGenConfig {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub image_size: ImageSize,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the full ordered conversation plus the declared tools and return
    /// the model's reply, including any structured function calls it made.
    async fn send_message_with_tools(
        &self,
        messages: Vec<Message>,
        available_tools: Vec<ToolDefinition>,
    ) -> Result<ChatResponse, LlmError>;

    /// Generate images for a prompt. Returns `data:` URIs ready for display.
    async fn generate_images(&self, config: &ImageGenConfig) -> Result<Vec<String>, LlmError>;
}

/// Decode a `data:<mime>;base64,<payload>` URI back into raw bytes.
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    use base64::Engine;

    let payload = uri.strip_prefix("data:")?.split_once(";base64,")?.1;
    base64::engine::general_purpose::STANDARD.decode(payload).ok()
}

pub mod gemini;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_round_trips() {
        let uri = "data:image/png;base64,aGVsbG8=";
        assert_eq!(decode_data_uri(uri).unwrap(), b"hello");
    }

    #[test]
    fn malformed_uris_decode_to_none() {
        assert!(decode_data_uri("not a uri").is_none());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_none());
    }

    #[test]
    fn supported_image_options_are_subsets() {
        assert!(AspectRatio::SUPPORTED.contains(&AspectRatio::Square));
        assert!(AspectRatio::SUPPORTED.contains(&AspectRatio::Widescreen));
        assert_eq!(ImageSize::SUPPORTED, &[ImageSize::Standard1K]);
        assert_eq!(AspectRatio::Cinematic.as_str(), "21:9");
    }
}
