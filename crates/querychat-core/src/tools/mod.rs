//! Tool system for querychat
//!
//! Tools are the closed set of operations the model may invoke. Each one
//! implements [`Tool`] and is dispatched by name through a [`ToolRegistry`].

pub mod base;
pub mod registry;
pub mod types;

pub use base::{Tool, ToolError};
pub use registry::ToolRegistry;
pub use types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
