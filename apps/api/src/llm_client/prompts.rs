// Shared prompt constants for completion calls.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System message fixing the assistant's role and the JSON-only format.
pub const INTERVIEWER_SYSTEM: &str = "You are a technical interviewer assistant that \
    creates questions for technical interviews. \
    Format your response as JSON without any explanation. \
    Follow the structure exactly.";
