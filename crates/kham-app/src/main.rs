use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use kham_config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod command;
pub mod controller;
pub mod events;
pub mod io;
pub mod lookup_context;
pub mod presenter;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::profile::ProfileStore;
use self::state::AppState;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json);

    let store = ProfileStore::default_location()?;
    if let Err(e) = store.init() {
        tracing::warn!("Could not initialize profiles: {}", e);
    }

    let mut config = store.load(&cli.profile).unwrap_or_else(|e| {
        tracing::error!("Failed to load profile {}: {:#}", cli.profile, e);
        Config::new()
    });
    cli.apply(&mut config);

    let state = Arc::new(AppState::new(config));
    tracing::info!("Dictionary ready: {} entries", state.dictionary.len());

    let controller = AppController::new(state.clone());
    let mut tasks = controller.spawn_tasks().await?;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();
    // let the UI print what the event loop sent before closing
    let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
        while tasks.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        tracing::warn!("Tasks still running after {:?}, aborting", SHUTDOWN_GRACE);
    }
    tasks.shutdown().await;

    let config = state.config.read().await.clone();
    if let Err(e) = store.save(&cli.profile, &config) {
        tracing::error!("Failed to save profile {}: {:#}", cli.profile, e);
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
