// Cover letter generation.
// Builds the prompt, runs upload → generate → delete, stores the result in the session.
// All Gemini calls go through llm_client. No direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
