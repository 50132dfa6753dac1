pub mod modules;
pub mod shared;

use modules::display::{ConsoleLabel, UiContext};
use modules::health::infrastructure::{PulseSimulator, SimulatedHealthStore, SimulationConfig};
use modules::health::HealthStore;
use modules::monitor::HeartRateMonitor;
use shared::errors::MonitorResult;
use shared::utils::init_logger;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Run a full monitoring session against the simulated store.
///
/// Wires the store, the UI loop and the monitor together, then idles until
/// ctrl-c. Teardown is deterministic: simulator first, then the observer
/// subscription, then the UI loop once its queue has drained.
pub async fn run() -> MonitorResult<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let store = Arc::new(SimulatedHealthStore::new());
    let ui = UiContext::spawn(Box::new(ConsoleLabel))?;

    // Cast to a trait object for dependency injection
    let health_store: Arc<dyn HealthStore> = store.clone();
    let monitor = HeartRateMonitor::new(health_store, ui.handle());

    monitor.authorize().await;
    let observation = monitor.subscribe_to_changes().await?;

    let sim_token = CancellationToken::new();
    let simulator = PulseSimulator::spawn(store, SimulationConfig::from_env(), sim_token.clone());

    log::info!("Monitoring started; press ctrl-c to stop");
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }

    log::info!("Shutting down");
    sim_token.cancel();
    if simulator.await.is_err() {
        log::warn!("Simulator task ended abnormally");
    }
    observation.shutdown().await;
    ui.shutdown();

    Ok(())
}
