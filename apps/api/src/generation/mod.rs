//! Prompt assembly for proposal generation.

pub mod builder;
pub mod prompts;

pub use builder::build_prompt;
