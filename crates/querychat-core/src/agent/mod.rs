//! Agent turn loop
//!
//! One user question is processed to completion before the next is accepted.
//! Within a turn the model may request tool calls; each is dispatched through
//! the registry and its result fed back until the model produces a plain
//! answer or the per-turn round budget runs out.

pub mod prompts;

use crate::error::{AgentError, AgentResult};
use crate::history::ConversationHistory;
use crate::llm::client::LlmClient;
use crate::llm::messages::LlmMessage;
use crate::tools::registry::ToolRegistry;
use crate::tools::types::ToolResult;
use tracing::{debug, warn};

/// Default cap on model/tool round trips per user turn
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// Drives a single conversation turn against the LLM and the tool registry
pub struct Agent {
    client: LlmClient,
    registry: ToolRegistry,
    system_prompt: String,
    max_tool_rounds: usize,
}

impl Agent {
    /// Create a new agent
    pub fn new(client: LlmClient, registry: ToolRegistry, system_prompt: String) -> Self {
        Self {
            client,
            registry,
            system_prompt,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    /// Override the per-turn tool round budget
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// Get the registry backing this agent
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Process one user question and return the final answer text.
    ///
    /// The caller owns the history and decides whether to record the turn;
    /// failed turns are typically left out so a transient error does not
    /// pollute the context window.
    pub async fn run_turn(
        &self,
        history: &ConversationHistory,
        user_input: &str,
    ) -> AgentResult<String> {
        let schemas = self.registry.schemas();

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(LlmMessage::system(&self.system_prompt));
        messages.extend(history.to_messages());
        messages.push(LlmMessage::user(user_input));

        for round in 0..self.max_tool_rounds {
            let response = self.client.chat(&messages, Some(&schemas)).await?;

            if !response.has_tool_calls() {
                return Ok(response.content);
            }

            debug!(
                round,
                calls = response.tool_calls.len(),
                "model requested tool calls"
            );

            messages.push(LlmMessage::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                let result = match self.registry.get(&call.name) {
                    Some(tool) => tool.execute_with_timing(call).await,
                    None => {
                        warn!(tool = %call.name, "model requested an unknown tool");
                        ToolResult::error(&call.id, &call.name, format!("unknown tool: {}", call.name))
                    }
                };

                debug!(tool = %call.name, success = result.success, "tool call finished");

                messages.push(LlmMessage::tool(
                    render_tool_result(&result),
                    call.id.clone(),
                    Some(call.name.clone()),
                ));
            }
        }

        Err(AgentError::llm(format!(
            "no final answer after {} rounds of tool calls",
            self.max_tool_rounds
        )))
    }
}

/// Render a tool result as the text relayed back to the model
fn render_tool_result(result: &ToolResult) -> String {
    if result.success {
        result.output.clone().unwrap_or_default()
    } else {
        format!("Error: {}", result.error.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_results_are_rendered_as_errors() {
        let result = ToolResult::error("c1", "execute_sql_query", "Denied: only SELECT allowed");
        assert_eq!(
            render_tool_result(&result),
            "Error: Denied: only SELECT allowed"
        );

        let result = ToolResult::success("c2", "list_tables", "users\norders");
        assert_eq!(render_tool_result(&result), "users\norders");
    }
}
