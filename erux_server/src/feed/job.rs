use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::state::Dashboard;

pub fn job_mock_feed(dashboard: Arc<Dashboard>, interval: Duration) -> Result<Job> {
    Job::new_repeated_async(interval, move |_uuid, _l| {
        let dashboard = dashboard.clone();
        Box::pin(async move {
            dashboard.record_mock_event().await;
        })
    })
    .map_err(|e| anyhow::anyhow!("Failed to create feed job: {}", e))
}

/// Emits one event right away, then one per `interval` until the scheduler
/// shuts down.
pub async fn start_feed(
    scheduler: &JobScheduler,
    dashboard: Arc<Dashboard>,
    interval: Duration,
) -> Result<()> {
    dashboard.record_mock_event().await;

    let job = job_mock_feed(dashboard, interval)?;

    if let Err(e) = scheduler.add(job).await {
        log::error!("Failed to add feed job to scheduler: {}", e);
        return Err(anyhow::anyhow!("Failed to add feed job: {}", e));
    }

    log::info!("Mock feed scheduled every {:?}", interval);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use erux_core::{directory::UserDirectory, feed::MockEventGenerator};

    #[tokio::test]
    async fn test_start_feed_emits_immediately() {
        let scheduler = JobScheduler::new().await.unwrap();
        let dashboard = Arc::new(Dashboard::new(
            UserDirectory::with_default_roster(),
            MockEventGenerator::seeded(8),
        ));

        start_feed(&scheduler, dashboard.clone(), Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(dashboard.log().read().await.len(), 1);
    }
}
