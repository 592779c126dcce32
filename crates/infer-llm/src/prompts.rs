//! System prompts for each conversation mode

/// Plain chat (batch and stream)
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Tool-enabled chat
pub const TOOL_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that can access external functions. \
    The responses from these functions will be appended to this dialog. \
    Please, provide responses based on the information from these function calls.";
