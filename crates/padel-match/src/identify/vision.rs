use async_trait::async_trait;
use tracing::debug;

use crate::llm::{CompletionOptions, ImageAttachment, LlmError, LlmProvider, Message};

/// Turns a racket photo into the model's raw reply text.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn describe(&self, image: &ImageAttachment) -> Result<String, LlmError>;
}

/// Vision provider backed by a multimodal chat-completion model.
pub struct LlmVisionProvider<P> {
    provider: P,
    options: CompletionOptions,
    language: String,
}

impl<P: LlmProvider> LlmVisionProvider<P> {
    pub fn new(provider: P, options: CompletionOptions, language: impl Into<String>) -> Self {
        Self {
            provider,
            options,
            language: language.into(),
        }
    }

    fn instructions(&self) -> String {
        format!(
            "You identify padel rackets from photos. Only discuss padel equipment. \
             Reply with strict JSON and nothing else, shaped as \
             {{\"brand\":\"...\",\"model\":\"...\",\"year\":2024,\"analysis\":\"...\",\"confidence\":0}}. \
             confidence is 0-100. Use null for a year you cannot read. \
             Write analysis in language '{}' as one or two sentences.",
            self.language
        )
    }
}

#[async_trait]
impl<P: LlmProvider> VisionProvider for LlmVisionProvider<P> {
    async fn describe(&self, image: &ImageAttachment) -> Result<String, LlmError> {
        let messages = [
            Message::system(self.instructions()),
            Message::user_with_image("Which racket is this?", image.clone()),
        ];

        let reply = self.provider.complete(&messages, &self.options).await?;
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            image_bytes = image.bytes.len(),
            "vision reply received"
        );
        Ok(reply)
    }
}
