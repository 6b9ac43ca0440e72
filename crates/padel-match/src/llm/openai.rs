//! OpenAI-compatible chat-completions provider.

use super::provider::{CompletionOptions, LlmError, LlmProvider};
use super::types::Message;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Talks to any server exposing `POST {base_url}/chat/completions`.
pub struct OpenAiCompatibleProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        }
    }

    fn to_wire_messages(messages: &[Message]) -> Vec<WireMessage> {
        messages.iter().map(WireMessage::from).collect()
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: Self::to_wire_messages(messages),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        debug!(
            model = %self.model,
            message_count = messages.len(),
            "sending completion request"
        );

        let mut builder = self
            .client
            .post(&url)
            .json(&request)
            .timeout(options.timeout);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to decode completion: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("completion has no content".to_string()))
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: WireContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart {
    Text { text: String },
    ImageUrl { image_url: WireImageUrl },
}

#[derive(Debug, Serialize)]
struct WireImageUrl {
    url: String,
}

impl From<&Message> for WireMessage {
    fn from(msg: &Message) -> Self {
        let content = match &msg.image {
            None => WireContent::Text(msg.content.clone()),
            Some(image) => {
                let data_url = format!(
                    "data:{};base64,{}",
                    image.mime_type.essence_str(),
                    STANDARD.encode(&image.bytes)
                );
                WireContent::Parts(vec![
                    WirePart::Text {
                        text: msg.content.clone(),
                    },
                    WirePart::ImageUrl {
                        image_url: WireImageUrl { url: data_url },
                    },
                ])
            }
        };

        WireMessage {
            role: msg.role.as_str(),
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}
