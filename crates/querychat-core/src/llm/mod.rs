//! LLM client and message types

pub mod client;
pub mod messages;

pub use client::LlmClient;
pub use messages::{LlmMessage, LlmResponse, LlmUsage, MessageRole};
