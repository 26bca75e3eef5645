use uuid::Uuid;

use super::actions::interpret_reply;
use super::dto::{ChatMessage, Turn};
use super::prompt::GREETING;
use super::provider::LanguageModel;

pub const NOT_INITIALIZED: &str = "El chat no está inicializado. Verifique la clave de API.";
pub const GENERIC_FAILURE: &str = "Lo siento, he encontrado un error al procesar tu solicitud.";

/// One operator conversation. Holds the visible transcript and the turns
/// replayed to the provider on every message.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
    turns: Vec<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![ChatMessage::ai(GREETING, None)],
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Sends `text` with the current system instruction and records the
    /// reply. Provider failures become the generic apology; the failed
    /// exchange is not kept in the provider history.
    pub async fn ask(
        &mut self,
        model: &dyn LanguageModel,
        system_instruction: &str,
        text: &str,
    ) -> ChatMessage {
        self.messages.push(ChatMessage::user(text));
        self.turns.push(Turn::user(text));

        let reply = match model.reply(system_instruction, &self.turns).await {
            Ok(raw) => {
                self.turns.push(Turn::model(raw.clone()));
                let (text, action) = interpret_reply(&raw);
                ChatMessage::ai(text, action)
            }
            Err(e) => {
                log::error!("Assistant session {} failed: {}", self.id, e);
                self.turns.pop();
                ChatMessage::ai(GENERIC_FAILURE, None)
            }
        };

        self.messages.push(reply.clone());
        reply
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
