//! AI adapters - Implementations of the CompletionProvider port.
//!
//! - `GroqProvider` - Groq's OpenAI-compatible chat completions
//! - `MockCompletionProvider` - Queued responses for tests

mod groq_provider;
mod mock_provider;

pub use groq_provider::{
    GroqConfig, GroqProvider, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use mock_provider::MockCompletionProvider;
