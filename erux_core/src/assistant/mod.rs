pub mod actions;
pub mod dto;
pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod session;

pub use provider::{build_provider, AssistantError, LanguageModel, ProviderKind, ProviderSettings};
pub use session::ChatSession;
