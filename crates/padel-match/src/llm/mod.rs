//! Model provider abstraction.
//!
//! The profiler and the gear identifier only see [`LlmProvider`]; the HTTP
//! client is one implementation among others (tests use scripted providers).

mod openai;
mod provider;
mod reply;
mod types;

pub use openai::OpenAiCompatibleProvider;
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use reply::extract_json_object;
pub use types::{ImageAttachment, Message, MessageRole};
