pub mod tool_call;

pub use tool_call::{Message as ToolCallMessage, ToolCallWidget};
