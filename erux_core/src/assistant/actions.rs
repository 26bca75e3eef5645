use std::sync::LazyLock;

use regex::Regex;

use super::dto::{AiAction, AssistantEnvelope, NavigationTarget};

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```json\s*\n?(.*?)\n?\s*```$").expect("json fence pattern")
});

/// Splits a model reply into the text to show and an optional action.
///
/// A reply carries an action only when the whole (trimmed) reply is one
/// fenced json block with a non-empty `response` and a known `action`.
/// Anything else is shown as-is.
pub fn interpret_reply(raw: &str) -> (String, Option<AiAction>) {
    let Some(captures) = JSON_FENCE.captures(raw.trim()) else {
        return (raw.to_string(), None);
    };

    let body = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

    match serde_json::from_str::<AssistantEnvelope>(body) {
        Ok(envelope) if !envelope.response.trim().is_empty() => {
            (envelope.response, Some(envelope.action))
        }
        Ok(_) => {
            log::error!("Assistant action reply has an empty response");
            (raw.to_string(), None)
        }
        Err(e) => {
            log::error!("Failed to parse assistant action: {}", e);
            (raw.to_string(), None)
        }
    }
}

/// Button label offered to the operator for a proposed action.
pub fn describe_action(action: &AiAction) -> &'static str {
    match action {
        AiAction::Navigate(NavigationTarget::OpenUserManagement) => "Ir a Gestión de Usuarios",
        AiAction::Navigate(NavigationTarget::OpenReports) => "Abrir Reportes",
        AiAction::Navigate(NavigationTarget::OpenSettings) => "Abrir Configuración",
        AiAction::ScheduleReport(_) => "Confirmar Programación",
    }
}
