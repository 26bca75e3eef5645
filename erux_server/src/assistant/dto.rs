use erux_core::{
    assistant::dto::{AiAction, ChatMessage, NavigationTarget},
    reports::ReportSchedule,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActionRequest {
    #[schema(value_type = Object)]
    pub action: AiAction,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionOutcome {
    Navigate {
        target: NavigationTarget,
        screen: String,
    },
    ReportScheduled {
        schedule: ReportSchedule,
    },
}
