//! Demo: open a sample restaurant, let the automation agent run it for a while,
//! then print the activity log and the day's numbers.

use pos_automation::config::SystemConfig;
use pos_automation::lifecycle::PosSystem;
use tick_actor::tracing::setup_tracing;
use tick_actor::ActorClient;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = SystemConfig::from_env();
    let run_for = config.run_for();
    info!(?config, "Starting POS automation demo");

    let mut system = PosSystem::new(config).map_err(|e| e.to_string())?;
    system.agent.start().await.map_err(|e| e.to_string())?;

    let span = tracing::info_span!("dining_room");
    async {
        tokio::select! {
            _ = tokio::time::sleep(run_for) => info!(?run_for, "Run time elapsed"),
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("Interrupted"),
                Err(e) => warn!(error = %e, "Could not listen for Ctrl-C"),
            },
        }
    }
    .instrument(span)
    .await;

    system.agent.stop().await.map_err(|e| e.to_string())?;

    let snapshot = system.client.snapshot().await.map_err(|e| e.to_string())?;
    for entry in snapshot.log.iter().rev() {
        info!("{}", entry);
    }
    let stats = system.client.stats().await.map_err(|e| e.to_string())?;
    let stats_json = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
    info!(ticks = snapshot.ticks, "Final stats:\n{}", stats_json);

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
