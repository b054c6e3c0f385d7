// Event post generation: form intake → prompt builder → completion calls.
// All LLM calls go through llm_client; no direct API calls here.

pub mod form;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompt_builder;
pub mod prompts;
