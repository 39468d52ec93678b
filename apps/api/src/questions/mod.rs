// Interview question generation.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
pub mod validation;
