use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_DELIVERY_TIME: &str = "08:00";
pub const DEFAULT_DELIVERY_FORMAT: ReportFormat = ReportFormat::Pdf;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid delivery time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("invalid delivery email '{0}'")]
    InvalidEmail(String),
    #[error("unknown report format '{0}'")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            _ => Err(ScheduleError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Daily delivery as requested by an operator or by the assistant. `email`
/// holds one or more comma-separated recipients. Time and format are
/// optional and fall back to 08:00 / pdf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportSchedule {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub recipients: Vec<String>,
    /// Normalized `HH:MM`, local time.
    pub time: String,
    pub format: ReportFormat,
}

impl ReportSchedule {
    pub fn from_request(request: ScheduleRequest) -> Result<Self, ScheduleError> {
        let recipients = parse_recipients(&request.email)?;

        let time = match request.time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => DEFAULT_DELIVERY_TIME.to_string(),
        };
        let (hour, minute) = parse_clock(&time)?;

        let format = match request.format.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => f.parse::<ReportFormat>()?,
            _ => DEFAULT_DELIVERY_FORMAT,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            recipients,
            time: format!("{:02}:{:02}", hour, minute),
            format,
        })
    }

    pub fn hour_minute(&self) -> Result<(u32, u32), ScheduleError> {
        parse_clock(&self.time)
    }

    /// Six-field cron expression (seconds first) firing once a day.
    pub fn cron_expression(&self) -> Result<String, ScheduleError> {
        let (hour, minute) = self.hour_minute()?;
        Ok(format!("0 {} {} * * *", minute, hour))
    }

    pub fn recipient_list(&self) -> String {
        self.recipients.join(", ")
    }

    /// Outbox file for one recipient of this schedule.
    pub fn delivery_file_name(&self, day: NaiveDate, recipient: &str, extension: &str) -> String {
        let slug: String = recipient
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        format!(
            "reporte_acceso_{}_{}.{}",
            day.format("%Y-%m-%d"),
            slug,
            extension
        )
    }
}

fn parse_recipients(value: &str) -> Result<Vec<String>, ScheduleError> {
    let recipients: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect();

    if recipients.is_empty() {
        return Err(ScheduleError::InvalidEmail(value.to_string()));
    }

    if let Some(invalid) = recipients.iter().find(|address| !is_email(address)) {
        return Err(ScheduleError::InvalidEmail(invalid.clone()));
    }

    Ok(recipients)
}

fn is_email(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !address.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Accepts `H`, `H:MM` and `HH:MM`.
fn parse_clock(value: &str) -> Result<(u32, u32), ScheduleError> {
    let invalid = || ScheduleError::InvalidTime(value.to_string());

    let (hour, minute) = match value.split_once(':') {
        Some((h, m)) => (h, m),
        None => (value, "00"),
    };

    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(invalid());
    }

    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !digits(hour) || !digits(minute) {
        return Err(invalid());
    }

    let hour = hour.parse::<u32>().map_err(|_| invalid())?;
    let minute = minute.parse::<u32>().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok((hour, minute))
}
