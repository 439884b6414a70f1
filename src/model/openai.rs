//! OpenAI-compatible argument extractor.
//!
//! Calls `{base_url}/chat/completions` with a single forced function
//! definition built from the operation's argument schema. The model's
//! `tool_calls[0].function.arguments` string becomes the raw extraction
//! payload; validation of its contents happens downstream.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::core::operation::OperationDescriptor;
use crate::model::types::{ArgumentExtractor, ExtractError, RawExtraction};

const SYSTEM_PROMPT: &str = "You extract structured arguments for a known operation from a user's question. \
Call the provided function with the argument values found in the question. \
Use only information present in the question; never invent values.";

#[derive(Debug, Clone)]
pub struct OpenAiExtractor {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ArgumentExtractor for OpenAiExtractor {
    async fn extract(
        &self,
        question: &str,
        operation: &OperationDescriptor,
        deadline: Option<Duration>,
    ) -> Result<RawExtraction, ExtractError> {
        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: question.to_string(),
                },
            ],
            temperature: 0.0,
            tools: vec![OpenAiTool {
                type_: "function".to_string(),
                function: OpenAiFunction {
                    name: operation.name.clone(),
                    description: operation.description.clone(),
                    parameters: operation.schema.to_json_schema(),
                },
            }],
            tool_choice: ToolChoice {
                type_: "function".to_string(),
                function: NamedFunction {
                    name: operation.name.clone(),
                },
            },
        };

        let mut request = self
            .client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(deadline) = deadline {
            request = request.timeout(deadline);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExtractError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExtractError::Request(e.to_string()))?;

        tracing::debug!("extractor response: status={}, body={}", status, text);

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ExtractError::Auth(format!(
                "extractor auth failed ({status}): {text}"
            )));
        }
        if !status.is_success() {
            return Err(ExtractError::Request(format!(
                "extractor error {status}: {text}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ExtractError::InvalidResponse(format!("extractor parse failed: {e}")))?;

        let arguments = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls)
            .and_then(|calls| calls.into_iter().next())
            .map(|call| call.function.arguments);

        Ok(RawExtraction { arguments })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    tools: Vec<OpenAiTool>,
    tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    type_: String,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    type_: String,
    function: NamedFunction,
}

#[derive(Debug, Serialize)]
struct NamedFunction {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    #[allow(dead_code)]
    name: String,
    arguments: String,
}
