use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::helpers::utils::leading_hour;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessStatus {
    Granted,
    Denied,
}

impl AccessStatus {
    /// Operator-facing wording.
    pub fn label(&self) -> &'static str {
        match self {
            AccessStatus::Granted => "Concedido",
            AccessStatus::Denied => "Denegado",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStatus::Granted => write!(f, "GRANTED"),
            AccessStatus::Denied => write!(f, "DENIED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessEvent {
    pub id: u64,
    pub name: String,
    pub time: String,
    pub date: String,
    pub status: AccessStatus,
    pub avatar: String,
    /// Registered user the subject resolved to when the event was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

impl AccessEvent {
    pub fn hour(&self) -> Option<u32> {
        leading_hour(&self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyEvent {
    pub id: u64,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub video_url: String,
}

impl EmergencyEvent {
    pub fn declared_at(timestamp: DateTime<Utc>) -> Self {
        let millis = timestamp.timestamp_millis().max(0) as u64;

        Self {
            id: millis,
            timestamp,
            video_url: format!("/videos/emergency_{}.mp4", millis),
        }
    }
}
