//! Background refresh scheduler
//!
//! Runs one refresh cycle immediately on start and then one per interval
//! until stopped. Each cycle executes in its own task, so a panic inside a
//! cycle is logged and the loop carries on with the next tick.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use application::RefreshService;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, error, info, warn};

/// What the scheduler is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next tick
    Idle,
    /// A refresh cycle is in flight
    Refreshing,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Refreshing => write!(f, "refreshing"),
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    refreshing: AtomicBool,
    cycles: AtomicU64,
}

/// Periodic driver for [`RefreshService::refresh`]
#[derive(Debug)]
pub struct RefreshScheduler {
    service: Arc<RefreshService>,
    interval: Duration,
}

impl RefreshScheduler {
    #[must_use]
    pub fn new(service: Arc<RefreshService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Start the loop on the current runtime
    ///
    /// Dropping the returned handle also ends the loop after the cycle in
    /// flight, if any.
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let shared = Arc::new(Shared::default());

        info!(
            interval_secs = self.interval.as_secs(),
            feeds = self.service.feeds().len(),
            "Starting refresh scheduler"
        );

        let task = {
            let shared = Arc::clone(&shared);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(self.interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = ticker.tick() => {},
                        _ = shutdown_rx.changed() => break,
                    }

                    let cycle = shared.cycles.fetch_add(1, Ordering::SeqCst) + 1;
                    shared.refreshing.store(true, Ordering::SeqCst);
                    run_cycle(Arc::clone(&self.service), cycle).await;
                    shared.refreshing.store(false, Ordering::SeqCst);
                }

                info!("Refresh scheduler stopped");
            })
        };

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
            shared,
        }
    }
}

async fn run_cycle(service: Arc<RefreshService>, cycle: u64) {
    debug!(cycle, "Refresh cycle starting");
    match tokio::spawn(async move { service.refresh().await }).await {
        Ok(Ok(report)) => debug!(
            cycle,
            events = report.events_published,
            feeds_failed = report.feeds_failed,
            "Refresh cycle completed"
        ),
        Ok(Err(e)) => warn!(cycle, error = %e, "Refresh cycle failed"),
        Err(e) => error!(cycle, error = %e, "Refresh cycle aborted"),
    }
}

/// Control and observation of a running scheduler
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    shared: Arc<Shared>,
}

impl fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("state", &self.state())
            .field("cycles", &self.cycles())
            .finish_non_exhaustive()
    }
}

impl SchedulerHandle {
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        if self.shared.refreshing.load(Ordering::SeqCst) {
            SchedulerState::Refreshing
        } else {
            SchedulerState::Idle
        }
    }

    /// Cycles started so far, including one in flight
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.shared.cycles.load(Ordering::SeqCst)
    }

    /// Whether the loop is still alive
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the loop to end and wait for it
    ///
    /// A cycle already in flight is allowed to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Refresh scheduler task failed");
        }
    }
}
