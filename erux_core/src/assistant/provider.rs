use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use thiserror::Error;

use super::dto::Turn;
use super::gemini::GeminiModel;
use super::openai::OpenAiModel;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("missing API key")]
    MissingKey,
    #[error("unknown assistant provider '{0}'")]
    UnknownProvider(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("could not decode provider output: {0}")]
    Decode(String),
    #[error("openai error: {0}")]
    OpenAi(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider returned an empty reply")]
    EmptyReply,
}

pub type ReplyStream = BoxStream<'static, Result<String, AssistantError>>;

/// Chat backend used by assistant sessions.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Streams the reply text for the last user turn of `history`.
    async fn stream_reply(
        &self,
        system_instruction: &str,
        history: &[Turn],
    ) -> Result<ReplyStream, AssistantError>;

    async fn reply(
        &self,
        system_instruction: &str,
        history: &[Turn],
    ) -> Result<String, AssistantError> {
        let mut stream = self.stream_reply(system_instruction, history).await?;
        let mut text = String::new();

        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?);
        }

        if text.trim().is_empty() {
            return Err(AssistantError::EmptyReply);
        }

        Ok(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
}

impl FromStr for ProviderKind {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(AssistantError::UnknownProvider(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_model: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub fn build_provider(
    settings: &ProviderSettings,
    api_key: &str,
) -> Result<Arc<dyn LanguageModel>, AssistantError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(AssistantError::MissingKey);
    }

    let model: Arc<dyn LanguageModel> = match settings.kind {
        ProviderKind::Gemini => Arc::new(GeminiModel::new(
            api_key,
            &settings.gemini_model,
            &settings.gemini_base_url,
            settings.timeout,
        )?),
        ProviderKind::OpenAi => Arc::new(OpenAiModel::new(
            api_key,
            &settings.openai_model,
            settings.timeout,
        )?),
    };

    Ok(model)
}
