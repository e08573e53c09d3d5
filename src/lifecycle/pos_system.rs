use crate::agent::{AgentError, AutomationAgent};
use crate::automation::{Automation, ConfigError};
use crate::clients::PosClient;
use crate::config::SystemConfig;
use crate::floor::Floor;
use crate::store::{self, PosError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Pos(#[from] PosError),

    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// One independent point-of-sale instance: a store actor, its client and the
/// automation agent that drives it.
///
/// Two systems never share state; each owns its own floor, log and random source.
///
/// # Example
///
/// ```ignore
/// let mut system = PosSystem::new(SystemConfig::from_env())?;
/// system.agent.start().await?;
/// // ... let the dining room run ...
/// system.shutdown().await?;
/// ```
pub struct PosSystem {
    /// Client for cashier actions and snapshots.
    pub client: PosClient,

    /// Stopped until `start` is called.
    pub agent: AutomationAgent,

    handle: JoinHandle<()>,
}

impl PosSystem {
    /// Validates `config`, spawns the store actor and wires up the agent.
    ///
    /// The driver's random source is seeded from `config.automation.seed`, or from
    /// OS entropy when unset.
    pub fn new(config: SystemConfig) -> Result<Self, SystemError> {
        config.validate()?;

        let floor = if config.seed_sample_data {
            Floor::sample()
        } else {
            Floor::new()
        };
        let rng = match config.automation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let interval = config.automation.interval();
        let automation = Automation::new(config.automation)?;

        let (actor, client) = store::new(floor, automation, config.mailbox_size);
        let handle = tokio::spawn(actor.run(rng));
        let agent = AutomationAgent::new(client.clone(), interval)?;

        info!(?interval, sample_data = config.seed_sample_data, "POS system started");
        Ok(Self {
            client,
            agent,
            handle,
        })
    }

    /// Stops the agent, closes the mailbox and waits for the store actor to exit.
    ///
    /// The actor only exits once every client clone is gone, so callers must drop
    /// clones they took from `self.client` before awaiting this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            client,
            mut agent,
            handle,
        } = self;

        agent.stop().await?;
        drop(agent);
        drop(client);

        if let Err(e) = handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(SystemError::TaskFailed(format!("{:?}", e)));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
