//! # Ticker
//!
//! A repeating timer that delivers a command to a [`StateActor`](crate::StateActor)
//! once per period.
//!
//! Ticks go through the actor's mailbox like any other request. A tick therefore
//! runs to completion inside the actor before the next message (another tick or a
//! user command) is handled, and stopping the ticker can never cut a tick in half.
//!
//! ```rust,ignore
//! let mut ticker = Ticker::new(Duration::from_secs(5))?;
//! ticker.start(client.clone(), || Command::Tick);
//! ticker.start(client.clone(), || Command::Tick); // replaces the first timer
//! ticker.stop();
//! ```

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::state::ActorState;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Start/stop handle around one background timer task.
///
/// At most one timer task exists per `Ticker`: [`Ticker::start`] cancels any
/// previous task first, and dropping the ticker cancels the current one.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Creates a stopped ticker. A zero period is rejected.
    pub fn new(period: Duration) -> Result<Self, FrameworkError> {
        if period.is_zero() {
            return Err(FrameworkError::InvalidPeriod(period));
        }
        Ok(Self {
            period,
            handle: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Changes the period used by the next [`Ticker::start`]. A running timer keeps
    /// its current period until restarted.
    pub fn set_period(&mut self, period: Duration) -> Result<(), FrameworkError> {
        if period.is_zero() {
            return Err(FrameworkError::InvalidPeriod(period));
        }
        self.period = period;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Starts delivering `make_command()` to the actor behind `client` every period.
    ///
    /// The first tick fires one full period after the call. Calling `start` on a
    /// running ticker replaces the old timer. The task ends on its own once the
    /// actor's mailbox is closed.
    pub fn start<S, F>(&mut self, client: StateClient<S>, make_command: F)
    where
        S: ActorState,
        F: Fn() -> S::Command + Send + 'static,
    {
        if self.stop() {
            debug!("Replacing running ticker");
        }

        let period = self.period;
        info!(?period, "Ticker started");
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match client.request(make_command()).await {
                    Ok(reply) => debug!(?reply, "Tick delivered"),
                    Err(e) if client.is_closed() => {
                        debug!(error = %e, "Actor gone, ticker exiting");
                        break;
                    }
                    Err(e) => warn!(error = %e, "Tick failed"),
                }
            }
        }));
    }

    /// Cancels the pending timer. Returns whether a timer was running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    info!("Ticker stopped");
                }
                was_running
            }
            None => false,
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::StateActor;

    #[derive(Debug, thiserror::Error)]
    #[error(transparent)]
    struct TickError(#[from] FrameworkError);

    #[derive(Default)]
    struct Beats(u32);

    impl ActorState for Beats {
        type Command = ();
        type Reply = u32;
        type Snapshot = u32;
        type Context = ();
        type Error = TickError;

        fn handle(&mut self, _: (), _: &mut ()) -> Result<u32, TickError> {
            self.0 += 1;
            Ok(self.0)
        }

        fn snapshot(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_zero_period_is_rejected() {
        assert_eq!(
            Ticker::new(Duration::ZERO).unwrap_err(),
            FrameworkError::InvalidPeriod(Duration::ZERO)
        );
        let mut ticker = Ticker::new(Duration::from_secs(1)).unwrap();
        assert!(ticker.set_period(Duration::ZERO).is_err());
        assert_eq!(ticker.period(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let (actor, client) = StateActor::new(Beats::default(), 8);
        tokio::spawn(actor.run(()));

        let mut ticker = Ticker::new(Duration::from_secs(5)).unwrap();
        ticker.start(client.clone(), || ());

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(client.snapshot().await.unwrap(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(client.snapshot().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_a_single_timer() {
        let (actor, client) = StateActor::new(Beats::default(), 8);
        tokio::spawn(actor.run(()));

        let mut ticker = Ticker::new(Duration::from_secs(5)).unwrap();
        ticker.start(client.clone(), || ());
        ticker.start(client.clone(), || ());
        assert!(ticker.is_running());

        tokio::time::sleep(Duration::from_millis(15_500)).await;
        assert_eq!(client.snapshot().await.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_ticks() {
        let (actor, client) = StateActor::new(Beats::default(), 8);
        tokio::spawn(actor.run(()));

        let mut ticker = Ticker::new(Duration::from_secs(2)).unwrap();
        ticker.start(client.clone(), || ());
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert!(ticker.stop());
        assert!(!ticker.is_running());
        assert!(!ticker.stop());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(client.snapshot().await.unwrap(), 2);
    }
}
