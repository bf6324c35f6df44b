// Resume optimization engine
// Implements: keyword extraction, section parsing, keyword injection, ATS scoring.
// All stages are pure functions over text; only the pipeline touches I/O (extraction).

pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod pipeline;
pub mod rewrite;
pub mod scoring;
pub mod sections;
