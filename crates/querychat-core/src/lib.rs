//! Core library for querychat
//!
//! Provides the pieces shared by the tool and CLI crates: the unified error
//! type, environment-based configuration, the OpenAI chat client, the `Tool`
//! trait with its registry, the bounded conversation history, and the agent
//! turn loop that ties them together.

pub mod agent;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod tools;

pub use agent::Agent;
pub use config::Config;
pub use error::{AgentError, AgentResult};
pub use history::ConversationHistory;
