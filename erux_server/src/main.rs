mod access;
mod assistant;
mod config;
mod docs;
mod emergencies;
mod error;
mod feed;
mod info;
mod reports;
mod router;
mod state;
mod users;

use std::sync::Arc;

use config::ServerConfig;
use dotenvy::dotenv;
use erux_core::{directory::UserDirectory, feed::MockEventGenerator};
use feed::job::start_feed;
use router::router;
use state::{Dashboard, ServerState};
use tokio_cron_scheduler::JobScheduler;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    let generator = match config.feed_seed {
        Some(seed) => {
            log::info!("Mock feed seeded with {}", seed);
            MockEventGenerator::seeded(seed)
        }
        None => MockEventGenerator::new(),
    };

    let dashboard = Arc::new(Dashboard::new(
        UserDirectory::with_default_roster(),
        generator,
    ));

    let mut scheduler = JobScheduler::new()
        .await
        .expect("Failed to create job scheduler");

    start_feed(&scheduler, dashboard.clone(), config.feed_interval)
        .await
        .expect("Failed to schedule mock feed");

    scheduler
        .start()
        .await
        .expect("Failed to start job scheduler");

    let state = Arc::new(ServerState::from((
        dashboard,
        scheduler.clone(),
        config.provider.clone(),
        config.outbox_dir.clone(),
    )));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_domain)
        .await
        .unwrap();

    log::info!("Listening on {}", config.server_domain);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    if let Err(e) = scheduler.shutdown().await {
        log::error!("Failed to shut down job scheduler: {}", e);
    }

    log::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    log::info!("Shutdown signal received");
}
