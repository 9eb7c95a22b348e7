// Tailoring pipeline: keyword-driven reordering, fact-locked rewrites, and
// cover-letter generation. All completion calls go through llm_client.

pub mod cover_letter;
pub mod fact_lock;
pub mod handlers;
pub mod prompts;
pub mod tailor;
