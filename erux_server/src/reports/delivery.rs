use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{Local, Utc};
use dashmap::DashMap;
use erux_core::reports::{
    ReportFormat, ReportSchedule, ScheduleRequest,
    handler::{build_report, render_csv, render_json},
};
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::{error::ErrorServer, state::Dashboard};

#[derive(Clone)]
struct ScheduledDelivery {
    schedule: ReportSchedule,
    job_id: Uuid,
}

/// Daily report deliveries keyed by schedule id.
#[derive(Clone, Default)]
pub struct ReportDeliveries {
    deliveries: Arc<DashMap<Uuid, ScheduledDelivery>>,
}

impl ReportDeliveries {
    pub async fn register(
        &self,
        scheduler: &JobScheduler,
        dashboard: Arc<Dashboard>,
        outbox_dir: PathBuf,
        request: ScheduleRequest,
    ) -> Result<ReportSchedule, ErrorServer> {
        let schedule = ReportSchedule::from_request(request)?;
        let cron = schedule.cron_expression()?;

        let job_schedule = schedule.clone();
        let job = Job::new_async_tz(cron.as_str(), Local, move |_uuid, _l| {
            let dashboard = dashboard.clone();
            let schedule = job_schedule.clone();
            let outbox_dir = outbox_dir.clone();
            Box::pin(async move {
                if let Err(e) = deliver_report(&dashboard, &schedule, &outbox_dir).await {
                    log::error!(
                        "Failed to deliver report to {}: {}",
                        schedule.recipient_list(),
                        e
                    );
                }
            })
        })
        .map_err(|e| {
            ErrorServer::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create delivery job: {}", e),
            )
        })?;

        let job_id = scheduler.add(job).await.map_err(|e| {
            log::error!("Failed to add delivery job to scheduler: {}", e);
            ErrorServer::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to add delivery job: {}", e),
            )
        })?;

        self.deliveries.insert(
            schedule.id,
            ScheduledDelivery {
                schedule: schedule.clone(),
                job_id,
            },
        );

        log::info!(
            "Scheduled daily {} report to {} at {}",
            schedule.format,
            schedule.recipient_list(),
            schedule.time
        );

        Ok(schedule)
    }

    /// Schedules ordered by delivery time.
    pub fn list(&self) -> Vec<ReportSchedule> {
        let mut schedules: Vec<ReportSchedule> = self
            .deliveries
            .iter()
            .map(|entry| entry.value().schedule.clone())
            .collect();
        schedules.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.recipients.cmp(&b.recipients)));
        schedules
    }

    pub async fn cancel(
        &self,
        scheduler: &JobScheduler,
        id: Uuid,
    ) -> Result<ReportSchedule, ErrorServer> {
        let (_, delivery) = self.deliveries.remove(&id).ok_or(ErrorServer::new(
            StatusCode::NOT_FOUND,
            format!("schedule {} not found", id),
        ))?;

        if let Err(e) = scheduler.remove(&delivery.job_id).await {
            log::error!("Failed to remove delivery job {}: {}", delivery.job_id, e);
        }

        log::info!(
            "Cancelled report delivery to {}",
            delivery.schedule.recipient_list()
        );
        Ok(delivery.schedule)
    }
}

/// Renders the current report and drops one copy per recipient into the
/// outbox.
pub async fn deliver_report(
    dashboard: &Dashboard,
    schedule: &ReportSchedule,
    outbox_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let snapshot = dashboard.snapshot().await;
    let report = build_report(
        &snapshot.log,
        &snapshot.users,
        &snapshot.emergencies,
        Utc::now(),
    );

    let (content, extension) = match schedule.format {
        ReportFormat::Json => (render_json(&report)?, "json"),
        ReportFormat::Csv => (render_csv(&report), "csv"),
        ReportFormat::Pdf => {
            log::warn!(
                "No pdf renderer, delivering json to {} instead",
                schedule.recipient_list()
            );
            (render_json(&report)?, "json")
        }
    };

    tokio::fs::create_dir_all(outbox_dir).await?;
    let day = Local::now().date_naive();

    let mut paths = Vec::with_capacity(schedule.recipients.len());
    for recipient in &schedule.recipients {
        let path = outbox_dir.join(schedule.delivery_file_name(day, recipient, extension));
        tokio::fs::write(&path, &content).await?;
        log::info!("Report for {} written to {}", recipient, path.display());
        paths.push(path);
    }

    Ok(paths)
}
