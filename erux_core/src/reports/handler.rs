use chrono::{DateTime, NaiveDate, Utc};

use super::dto::{AccessReport, Analytics, HourlyBucket, LogTab, ReportSummary, TabEntries};
use crate::access::compliance::late_arrivals;
use crate::access::dto::{AccessEvent, AccessStatus, EmergencyEvent};
use crate::directory::dto::RegisteredUser;

pub fn analytics(log: &[AccessEvent], users: &[RegisteredUser]) -> Analytics {
    let granted = log
        .iter()
        .filter(|e| e.status == AccessStatus::Granted)
        .count();
    let denied = log
        .iter()
        .filter(|e| e.status == AccessStatus::Denied)
        .count();

    let mut hourly: Vec<HourlyBucket> = (0..24)
        .map(|hour| HourlyBucket {
            label: format!("{:02}", hour),
            value: 0,
        })
        .collect();

    for event in log {
        if let Some(bucket) = event.hour().and_then(|h| hourly.get_mut(h as usize)) {
            bucket.value += 1;
        }
    }

    Analytics {
        granted,
        denied,
        hourly,
        late_arrivals: late_arrivals(log, users),
    }
}

pub fn build_report(
    log: &[AccessEvent],
    users: &[RegisteredUser],
    emergencies: &[EmergencyEvent],
    generated_at: DateTime<Utc>,
) -> AccessReport {
    let stats = analytics(log, users);

    AccessReport {
        summary: ReportSummary {
            total_accesses: log.len(),
            granted: stats.granted,
            denied: stats.denied,
            late_arrivals: stats.late_arrivals.len(),
            emergency_events: emergencies.len(),
            generated_at,
        },
        access_log: log.to_vec(),
        late_arrivals: stats.late_arrivals,
        emergency_events: emergencies.to_vec(),
    }
}

pub fn tab_entries(
    tab: LogTab,
    log: &[AccessEvent],
    users: &[RegisteredUser],
    emergencies: &[EmergencyEvent],
) -> TabEntries {
    match tab {
        LogTab::All => TabEntries::Access(log.to_vec()),
        LogTab::Late => TabEntries::Access(late_arrivals(log, users)),
        LogTab::Emergency => TabEntries::Emergency(emergencies.to_vec()),
    }
}

pub fn report_file_name(day: NaiveDate) -> String {
    format!("reporte_acceso_{}.json", day.format("%Y-%m-%d"))
}

/// Pretty-printed JSON, two-space indent.
pub fn render_json(report: &AccessReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Access log as CSV with a late-arrival column.
pub fn render_csv(report: &AccessReport) -> String {
    let mut out = String::from("id,name,date,time,status,late\n");

    for event in &report.access_log {
        let late = report.late_arrivals.iter().any(|l| l.id == event.id);
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            event.id,
            csv_field(&event.name),
            csv_field(&event.date),
            csv_field(&event.time),
            event.status,
            late
        ));
    }

    out
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
