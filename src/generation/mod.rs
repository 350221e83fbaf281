// src/generation/mod.rs
pub mod backend;
pub mod pipeline;
pub mod prompts;

pub use backend::{GeminiClient, TextGenerator};
pub use pipeline::{extract_json_block, parse_json_block, GenerationPipeline, GenerationRequest};
