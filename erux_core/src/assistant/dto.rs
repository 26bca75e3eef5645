use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::reports::schedule::ScheduleRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    OpenUserManagement,
    OpenReports,
    OpenSettings,
}

impl NavigationTarget {
    /// Screen the operator console should bring up.
    pub fn screen(&self) -> &'static str {
        match self {
            NavigationTarget::OpenUserManagement => "user_management",
            NavigationTarget::OpenReports => "reports",
            NavigationTarget::OpenSettings => "settings",
        }
    }
}

/// Action proposed by the assistant. Wire shape is
/// `{"type": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AiAction {
    Navigate(NavigationTarget),
    ScheduleReport(ScheduleRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub action: Option<AiAction>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::User,
            action: None,
        }
    }

    pub fn ai(text: impl Into<String>, action: Option<AiAction>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Ai,
            action,
        }
    }
}

/// Structured reply the model is asked to wrap in a json fence.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantEnvelope {
    pub response: String,
    pub action: AiAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One exchange of the conversation as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_wire_shape() {
        let navigate: AiAction = serde_json::from_value(json!({
            "type": "navigate",
            "payload": "open_reports"
        }))
        .unwrap();
        assert_eq!(navigate, AiAction::Navigate(NavigationTarget::OpenReports));

        let schedule: AiAction = serde_json::from_value(json!({
            "type": "schedule_report",
            "payload": {"email": "gerencia@miempresa.com", "time": "08:00", "format": "pdf"}
        }))
        .unwrap();
        match schedule {
            AiAction::ScheduleReport(request) => {
                assert_eq!(request.email, "gerencia@miempresa.com");
                assert_eq!(request.format.as_deref(), Some("pdf"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let parsed = serde_json::from_value::<AiAction>(json!({
            "type": "delete_everything",
            "payload": {}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_message_serialization_omits_empty_action() {
        let value = serde_json::to_value(ChatMessage::ai("hola", None)).unwrap();
        assert_eq!(value["sender"], "ai");
        assert!(value.get("action").is_none());
    }
}
