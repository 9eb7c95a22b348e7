// Prompt constants for the tailoring module. Each module that calls the
// completion service keeps its prompts alongside it.

/// System prompt for the summary rewrite. The fact-lock verifier enforces
/// the no-new-facts rule regardless of what the model does with this.
pub const SUMMARY_REWRITE_SYSTEM: &str = "You are an ATS resume assistant. \
    Rewrite the summary using only facts already present. \
    Do not add new employers, degrees, dates, titles, or metrics. \
    If unsure, keep original phrasing. \
    Output only the rewritten summary.";

pub const SUMMARY_REWRITE_TEMPERATURE: f32 = 0.1;

/// System prompt for cover-letter drafting, verified the same way.
pub const COVER_LETTER_SYSTEM: &str = "You write ATS-safe cover letters. \
    Use only facts from the resume. \
    Do not invent employers, degrees, dates, certifications, or metrics. \
    Keep a single-column letter. \
    Return only the letter text.";

pub const COVER_LETTER_TEMPERATURE: f32 = 0.2;
