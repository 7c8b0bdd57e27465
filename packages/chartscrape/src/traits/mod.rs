//! Core trait abstractions.
//!
//! The page fetcher and the LLM completion service sit behind traits
//! so the pipeline can be exercised
//! end to end against mocks.

pub mod completion;
pub mod fetcher;
