//! OpenAI chat-completions client

use crate::config::OpenAiConfig;
use crate::error::{AgentError, AgentResult};
use crate::llm::messages::{LlmMessage, LlmResponse, LlmUsage};
use crate::tools::types::{ToolCall, ToolSchema};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the OpenAI chat-completions API.
///
/// Sends the conversation plus the tool schemas with each request and parses
/// the reply into text content and tool calls. API errors carry the status
/// and response body; the API key never appears in error output.
pub struct LlmClient {
    config: OpenAiConfig,
    http_client: Client,
}

impl LlmClient {
    /// Create a new LLM client
    pub fn new(config: OpenAiConfig) -> AgentResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::llm(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the model name configured for this client
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a chat request and parse the response
    #[instrument(skip(self, messages, tools), level = "debug")]
    pub async fn chat(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[ToolSchema]>,
    ) -> AgentResult<LlmResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut request_body = json!({
            "model": self.config.model,
            "messages": to_openai_messages(messages),
        });

        if let Some(tools) = tools {
            if !tools.is_empty() {
                request_body["tools"] = json!(to_openai_tools(tools));
            }
        }

        debug!(model = %self.config.model, messages = messages.len(), "sending chat request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AgentError::llm(format!("OpenAI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::llm(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AgentError::llm(format!("failed to parse OpenAI response: {e}")))?;

        parse_chat_response(response_json)
    }
}

/// Convert messages to the OpenAI wire format
fn to_openai_messages(messages: &[LlmMessage]) -> Vec<Value> {
    let mut converted = Vec::with_capacity(messages.len());

    for message in messages {
        let mut msg = json!({
            "role": message.role.to_string(),
            "content": message.content
        });

        if let Some(tool_calls) = &message.tool_calls {
            let openai_tool_calls: Vec<Value> = tool_calls
                .iter()
                .map(|tc| {
                    json!({
                        "id": tc.id,
                        "type": "function",
                        "function": {
                            "name": tc.name,
                            "arguments": serde_json::to_string(&tc.arguments).unwrap_or_default()
                        }
                    })
                })
                .collect();
            msg["tool_calls"] = json!(openai_tool_calls);
        }

        if let Some(tool_call_id) = &message.tool_call_id {
            msg["tool_call_id"] = json!(tool_call_id);
        }

        if let Some(name) = &message.name {
            msg["name"] = json!(name);
        }

        converted.push(msg);
    }

    converted
}

/// Convert tool schemas to OpenAI function definitions
fn to_openai_tools(tools: &[ToolSchema]) -> Vec<Value> {
    tools
        .iter()
        .map(|schema| {
            json!({
                "type": "function",
                "function": {
                    "name": schema.name,
                    "description": schema.description,
                    "parameters": schema.parameters,
                }
            })
        })
        .collect()
}

/// Parse an OpenAI chat-completions response
fn parse_chat_response(response: Value) -> AgentResult<LlmResponse> {
    let choice = response["choices"][0].clone();
    if choice.is_null() {
        return Err(AgentError::llm("OpenAI response contained no choices"));
    }
    let message = &choice["message"];

    let content = message["content"].as_str().unwrap_or("").to_string();

    let mut tool_calls = Vec::new();
    if let Some(calls) = message["tool_calls"].as_array() {
        for call in calls {
            if let Some(function) = call["function"].as_object() {
                let id = match call["id"].as_str() {
                    Some(id) if !id.is_empty() => id.to_string(),
                    _ => format!("call_{}", uuid::Uuid::new_v4()),
                };
                tool_calls.push(ToolCall {
                    id,
                    name: function
                        .get("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string(),
                    arguments: serde_json::from_str(
                        function
                            .get("arguments")
                            .and_then(|v| v.as_str())
                            .unwrap_or("{}"),
                    )
                    .unwrap_or_default(),
                });
            }
        }
    }

    let usage = response["usage"].as_object().map(|usage_data| LlmUsage {
        prompt_tokens: usage_data
            .get("prompt_tokens")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32,
        completion_tokens: usage_data
            .get("completion_tokens")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32,
        total_tokens: usage_data
            .get("total_tokens")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32,
    });

    Ok(LlmResponse {
        content,
        tool_calls,
        usage,
        model: response["model"].as_str().map(|s| s.to_string()),
        finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
        id: response["id"].as_str().map(|s| s.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_tool_result_messages() {
        let messages = vec![
            LlmMessage::system("be helpful"),
            LlmMessage::tool("3 rows", "call-7", Some("list_tables")),
        ];

        let converted = to_openai_messages(&messages);
        assert_eq!(converted[0]["role"], "system");
        assert_eq!(converted[1]["role"], "tool");
        assert_eq!(converted[1]["tool_call_id"], "call-7");
        assert_eq!(converted[1]["name"], "list_tables");
    }

    #[test]
    fn converts_tool_schemas_to_function_definitions() {
        let schema = ToolSchema::new(
            "list_tables",
            "List all tables",
            vec![],
        );

        let converted = to_openai_tools(&[schema]);
        assert_eq!(converted[0]["type"], "function");
        assert_eq!(converted[0]["function"]["name"], "list_tables");
        assert!(converted[0]["function"]["parameters"]["properties"].is_object());
    }

    #[test]
    fn parses_text_response() {
        let response = json!({
            "id": "chatcmpl-1",
            "model": "gpt-4.1-nano",
            "choices": [{
                "message": {"role": "assistant", "content": "There are 3 tables."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
        });

        let parsed = parse_chat_response(response).unwrap();
        assert_eq!(parsed.content, "There are 3 tables.");
        assert!(parsed.tool_calls.is_empty());
        assert_eq!(parsed.finish_reason.as_deref(), Some("stop"));
        assert_eq!(parsed.usage.unwrap().total_tokens, 19);
    }

    #[test]
    fn parses_tool_call_response() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call-1",
                        "type": "function",
                        "function": {
                            "name": "describe_table",
                            "arguments": "{\"table_name\": \"orders\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });

        let parsed = parse_chat_response(response).unwrap();
        assert!(parsed.has_tool_calls());
        let call = &parsed.tool_calls[0];
        assert_eq!(call.name, "describe_table");
        assert_eq!(call.get_string("table_name").as_deref(), Some("orders"));
    }

    #[test]
    fn missing_choices_is_an_error() {
        let response = json!({"choices": []});
        assert!(parse_chat_response(response).is_err());
    }

    #[test]
    fn malformed_arguments_fall_back_to_empty_map() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "id": "call-2",
                        "type": "function",
                        "function": {"name": "list_tables", "arguments": "not json"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });

        let parsed = parse_chat_response(response).unwrap();
        assert!(parsed.tool_calls[0].arguments.is_empty());
    }
}
