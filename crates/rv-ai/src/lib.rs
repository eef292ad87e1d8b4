//! # rv-ai
//!
//! Text generation for Receivables RS.
//!
//! - [`TextGenerator`]: the text-in, text-out provider boundary
//! - [`RetryPolicy`]: bounded attempts with a delay ladder
//! - [`AiAssistant`]: collection letters, risk summaries and smart fill
//!
//! Generation never fails from the caller's point of view. Exhausted
//! retries come back as a readable message in place of the text.

pub mod assistant;
pub mod chat;
pub mod generator;
pub mod prompts;
pub mod proxy;
pub mod retry;

pub use assistant::{parse_draft, AiAssistant, FAILURE_PREFIX, UNAVAILABLE_MESSAGE};
pub use chat::ChatCompletionsGenerator;
pub use generator::{select_generator, CannedGenerator, ProviderCredentials, TextGenerator};
pub use proxy::ProxyGenerator;
pub use retry::RetryPolicy;
