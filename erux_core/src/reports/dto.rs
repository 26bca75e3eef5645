use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::access::dto::{AccessEvent, EmergencyEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HourlyBucket {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub granted: usize,
    pub denied: usize,
    pub hourly: Vec<HourlyBucket>,
    pub late_arrivals: Vec<AccessEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_accesses: usize,
    pub granted: usize,
    pub denied: usize,
    pub late_arrivals: usize,
    pub emergency_events: usize,
    #[schema(value_type = String)]
    pub generated_at: DateTime<Utc>,
}

/// Downloadable report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessReport {
    pub summary: ReportSummary,
    pub access_log: Vec<AccessEvent>,
    pub late_arrivals: Vec<AccessEvent>,
    pub emergency_events: Vec<EmergencyEvent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogTab {
    #[default]
    All,
    Late,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TabEntries {
    Access(Vec<AccessEvent>),
    Emergency(Vec<EmergencyEvent>),
}
