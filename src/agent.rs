//! # Automation Agent
//!
//! The start/stop control panel for the activity driver. It owns a [`Ticker`] that
//! sends [`PosCommand::Tick`] to the store every interval, and announces state
//! changes in the activity log.

use crate::automation::{validate_interval, ConfigError, TickReport};
use crate::clients::PosClient;
use crate::store::{PosCommand, PosError};
use std::time::Duration;
use thiserror::Error;
use tick_actor::{ActorClient, FrameworkError, Ticker};
use tracing::{debug, info, instrument};

pub const STARTED_NOTE: &str = "Automation agent started";
pub const STOPPED_NOTE: &str = "Automation agent stopped";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pos(#[from] PosError),

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

pub struct AutomationAgent {
    client: PosClient,
    ticker: Ticker,
}

impl AutomationAgent {
    /// A stopped agent ticking every `interval` once started.
    pub fn new(client: PosClient, interval: Duration) -> Result<Self, AgentError> {
        validate_interval(interval)?;
        Ok(Self {
            client,
            ticker: Ticker::new(interval)?,
        })
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn interval(&self) -> Duration {
        self.ticker.period()
    }

    /// Starts ticking. Starting a running agent replaces its timer, so there is
    /// never more than one.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), AgentError> {
        let was_running = self.is_running();
        self.ticker
            .start(self.client.inner().clone(), || PosCommand::Tick);
        if was_running {
            debug!("Automation agent restarted");
        } else {
            info!(interval = ?self.interval(), "Automation agent started");
            self.client.note(STARTED_NOTE).await?;
        }
        Ok(())
    }

    /// Cancels the pending tick. Returns whether the agent was running.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Result<bool, AgentError> {
        let was_running = self.ticker.stop();
        if was_running {
            info!("Automation agent stopped");
            self.client.note(STOPPED_NOTE).await?;
        }
        Ok(was_running)
    }

    /// Changes the tick interval. A running agent restarts on the new interval,
    /// so its next tick comes one full new interval from now.
    #[instrument(skip(self))]
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), AgentError> {
        validate_interval(interval)?;
        self.ticker.set_period(interval)?;
        if self.ticker.is_running() {
            self.ticker
                .start(self.client.inner().clone(), || PosCommand::Tick);
        }
        info!(?interval, "Tick interval changed");
        Ok(())
    }

    pub async fn set_auto_settle(&self, on: bool) -> Result<(), AgentError> {
        Ok(self.client.set_auto_settle(on).await?)
    }

    pub async fn clear_log(&self) -> Result<(), AgentError> {
        Ok(self.client.clear_log().await?)
    }

    /// Runs one tick immediately, whether or not the timer is running.
    pub async fn tick_now(&self) -> Result<TickReport, AgentError> {
        Ok(self.client.tick().await?)
    }
}
