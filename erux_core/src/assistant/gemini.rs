use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::dto::{Role, Turn};
use super::provider::{AssistantError, LanguageModel, ReplyStream};

/// Gemini `streamGenerateContent` over server-sent events.
pub struct GeminiModel {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiModel {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    async fn stream_reply(
        &self,
        system_instruction: &str,
        history: &[Turn],
    ) -> Result<ReplyStream, AssistantError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction,
                }],
            },
            contents: history
                .iter()
                .map(|turn| Content {
                    role: Some(match turn.role {
                        Role::User => "user",
                        Role::Model => "model",
                    }),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(decode_sse(Box::pin(response.bytes_stream())).boxed())
    }
}

struct SseState<S> {
    inner: S,
    buffer: Vec<u8>,
    pending: VecDeque<Result<String, AssistantError>>,
    finished: bool,
}

impl<S> SseState<S> {
    fn drain_lines(&mut self) {
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);

            let Some(data) = line.trim().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data.is_empty() || data == "[DONE]" {
                continue;
            }

            match parse_chunk(data) {
                Ok(text) if !text.is_empty() => self.pending.push_back(Ok(text)),
                Ok(_) => {}
                Err(e) => self.pending.push_back(Err(e)),
            }
        }
    }
}

fn parse_chunk(data: &str) -> Result<String, AssistantError> {
    let chunk: StreamChunk =
        serde_json::from_str(data).map_err(|e| AssistantError::Decode(e.to_string()))?;

    Ok(chunk
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect())
}

/// Turns a byte stream of SSE frames into the text pieces they carry. Frames
/// may be split anywhere across network chunks.
pub fn decode_sse<S, B, E>(inner: S) -> impl Stream<Item = Result<String, AssistantError>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<AssistantError>,
{
    let state = SseState {
        inner,
        buffer: Vec::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.inner.next().await {
                Some(Ok(bytes)) => {
                    state.buffer.extend_from_slice(bytes.as_ref());
                    state.drain_lines();
                }
                Some(Err(e)) => {
                    state.finished = true;
                    state.pending.push_back(Err(e.into()));
                }
                None => {
                    state.finished = true;
                    state.buffer.push(b'\n');
                    state.drain_lines();
                }
            }
        }
    })
}
