use std::time::Duration;

use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use open_ai_rust_responses_by_sshift::{Client as OAIClient, Model, Request};

use super::dto::{Role, Turn};
use super::provider::{AssistantError, LanguageModel, ReplyStream};

/// OpenAI Responses backend. Replies arrive in one piece.
pub struct OpenAiModel {
    client: OAIClient,
    model: String,
    timeout: Duration,
}

impl OpenAiModel {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, AssistantError> {
        let client = OAIClient::new(api_key).map_err(|e| AssistantError::OpenAi(e.to_string()))?;

        Ok(Self {
            client,
            model: model.to_string(),
            timeout,
        })
    }
}

pub fn model_from_name(name: &str) -> Model {
    match name.trim().to_lowercase().as_str() {
        "gpt-5" => Model::GPT5,
        "gpt-5-mini" => Model::GPT5Mini,
        "gpt-5-nano" => Model::GPT5Nano,
        "gpt-4.1" => Model::GPT41,
        "gpt-4.1-mini" => Model::GPT41Mini,
        "gpt-4.1-nano" => Model::GPT41Nano,
        "gpt-4o" => Model::GPT4o,
        other => {
            log::warn!("Unknown OpenAI model '{}', using gpt-5-mini", other);
            Model::GPT5Mini
        }
    }
}

/// Flattens the earlier turns into a transcript ahead of the last message.
pub fn transcript_input(history: &[Turn]) -> String {
    let Some((last, earlier)) = history.split_last() else {
        return String::new();
    };

    if earlier.is_empty() {
        return last.text.clone();
    }

    let mut input = String::from("Conversación previa:\n");
    for turn in earlier {
        let speaker = match turn.role {
            Role::User => "Operador",
            Role::Model => "Centinela",
        };
        input.push_str(&format!("{}: {}\n", speaker, turn.text));
    }
    input.push_str(&format!("\nMensaje actual:\n{}", last.text));

    input
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn stream_reply(
        &self,
        system_instruction: &str,
        history: &[Turn],
    ) -> Result<ReplyStream, AssistantError> {
        let request = Request::builder()
            .model(model_from_name(&self.model))
            .instructions(system_instruction.to_string())
            .input(transcript_input(history))
            .max_output_tokens(1000)
            .build();

        let response = tokio::time::timeout(self.timeout, self.client.responses.create(request))
            .await
            .map_err(|_| AssistantError::Timeout(self.timeout))?
            .map_err(|e| AssistantError::OpenAi(e.to_string()))?;

        let text = response.output_text().to_string();

        Ok(stream::once(async move { Ok(text) }).boxed())
    }
}
