// Matching engine: job-description keyword extraction and resume scoring.

pub mod handlers;
pub mod keywords;
pub mod scorer;
