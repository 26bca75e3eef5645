use std::{path::PathBuf, sync::Arc, time::Instant};

use chrono::{Local, Utc};
use erux_core::{
    access::{AccessEvent, AccessLog, EmergencyEvent, EmergencyLog},
    assistant::ProviderSettings,
    directory::{UserDirectory, dto::RegisteredUser},
    feed::{DetectionBanner, MockEventGenerator},
};
use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::JobScheduler;

use crate::{assistant::handler::AssistantSessions, reports::delivery::ReportDeliveries};

/// Live kiosk data shared by the feed job, the report jobs and the handlers.
pub struct Dashboard {
    log: RwLock<AccessLog>,
    directory: RwLock<UserDirectory>,
    emergencies: RwLock<EmergencyLog>,
    generator: Mutex<MockEventGenerator>,
    detection: Mutex<DetectionBanner>,
}

/// Consistent copy of the data a report or a prompt is built from.
pub struct Snapshot {
    pub log: Vec<AccessEvent>,
    pub users: Vec<RegisteredUser>,
    pub emergencies: Vec<EmergencyEvent>,
}

impl Dashboard {
    pub fn new(directory: UserDirectory, generator: MockEventGenerator) -> Self {
        Self {
            log: RwLock::new(AccessLog::default()),
            directory: RwLock::new(directory),
            emergencies: RwLock::new(EmergencyLog::default()),
            generator: Mutex::new(generator),
            detection: Mutex::new(DetectionBanner::default()),
        }
    }

    pub fn log(&self) -> &RwLock<AccessLog> {
        &self.log
    }

    pub fn directory(&self) -> &RwLock<UserDirectory> {
        &self.directory
    }

    pub fn emergencies(&self) -> &RwLock<EmergencyLog> {
        &self.emergencies
    }

    pub fn detection(&self) -> &Mutex<DetectionBanner> {
        &self.detection
    }

    /// One feed tick: synthesize an attempt, log it and show it on the banner.
    pub async fn record_mock_event(&self) -> AccessEvent {
        let event = {
            let directory = self.directory.read().await;
            let mut generator = self.generator.lock().await;
            generator.next_event(Local::now(), &directory)
        };

        self.log.write().await.push(event.clone());
        self.detection.lock().await.detect(&event.name, Instant::now());

        log::info!(
            "Access {} for {} at {} {}",
            event.status,
            event.name,
            event.date,
            event.time
        );

        event
    }

    pub async fn declare_emergency(&self) -> EmergencyEvent {
        let event = EmergencyEvent::declared_at(Utc::now());
        self.emergencies.write().await.record(event.clone());
        log::warn!("Emergency declared, recording {}", event.video_url);
        event
    }

    pub async fn snapshot(&self) -> Snapshot {
        let log = self.log.read().await.to_vec();
        let users = self.directory.read().await.list().to_vec();
        let emergencies = self.emergencies.read().await.to_vec();

        Snapshot {
            log,
            users,
            emergencies,
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    dashboard: Arc<Dashboard>,
    scheduler: JobScheduler,
    deliveries: ReportDeliveries,
    sessions: AssistantSessions,
    provider: ProviderSettings,
    outbox_dir: PathBuf,
}

impl From<(Arc<Dashboard>, JobScheduler, ProviderSettings, PathBuf)> for ServerState {
    fn from(states: (Arc<Dashboard>, JobScheduler, ProviderSettings, PathBuf)) -> Self {
        let (dashboard, scheduler, provider, outbox_dir) = states;
        Self {
            dashboard,
            scheduler,
            deliveries: ReportDeliveries::default(),
            sessions: AssistantSessions::default(),
            provider,
            outbox_dir,
        }
    }
}

impl ServerState {
    pub fn dashboard(&self) -> &Arc<Dashboard> {
        &self.dashboard
    }

    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    pub fn deliveries(&self) -> &ReportDeliveries {
        &self.deliveries
    }

    pub fn sessions(&self) -> &AssistantSessions {
        &self.sessions
    }

    pub fn provider(&self) -> &ProviderSettings {
        &self.provider
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.outbox_dir.clone()
    }
}
