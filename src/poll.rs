//! Background feed polling.
//!
//! Once the first feed is added, [`PollingCycle`] wakes up every interval,
//! fetches every tracked feed concurrently, waits for all of them to settle
//! and merges the new posts. The next tick is scheduled only after the merge,
//! so ticks never overlap. Per-feed failures are dropped inside the tick and
//! never stop the loop.
//!
//! The loop runs on the local task set, sharing the [`App`] through
//! `Rc<RefCell<_>>`. No borrow is held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::app::App;
use crate::dispatch::Renderer;
use crate::error::TransitionError;
use crate::i18n::Localizer;
use crate::source::Transport;

/// The application shared between the UI loop and background tasks.
pub type SharedApp<R, L> = Rc<RefCell<App<R, L>>>;

pub struct PollingCycle<T, R, L> {
    app: SharedApp<R, L>,
    transport: Rc<T>,
    interval: Duration,
}

impl<T, R, L> PollingCycle<T, R, L>
where
    T: Transport + 'static,
    R: Renderer + 'static,
    L: Localizer + 'static,
{
    pub fn new(app: SharedApp<R, L>, transport: Rc<T>, interval: Duration) -> Self {
        Self {
            app,
            transport,
            interval,
        }
    }

    /// One fetch-parse-merge pass. Returns the number of new posts.
    pub async fn tick(&self) -> Result<usize, TransitionError> {
        let tracked = self.app.borrow_mut().begin_tick()?;
        debug!(feeds = tracked.len(), "polling tick");

        let payloads = join_all(
            tracked
                .iter()
                .map(|(_, url)| self.transport.fetch(url)),
        )
        .await;

        let fetched = tracked
            .into_iter()
            .map(|(id, _)| id)
            .zip(payloads)
            .collect();
        self.app.borrow_mut().merge_tick(fetched)
    }

    /// Sleep, tick, repeat. Only a broken state machine ends the loop.
    pub async fn run(self) -> Result<(), TransitionError> {
        info!(interval_ms = self.interval.as_millis() as u64, "polling started");
        loop {
            tokio::time::sleep(self.interval).await;
            if let Err(e) = self.tick().await {
                error!(error = %e, "polling stopped");
                return Err(e);
            }
        }
    }

    /// Run the loop on the current [`tokio::task::LocalSet`].
    pub fn spawn(self) -> PollHandle {
        PollHandle {
            task: tokio::task::spawn_local(self.run()),
        }
    }
}

/// Owns the polling task. Dropping the handle leaves the task running.
pub struct PollHandle {
    task: JoinHandle<Result<(), TransitionError>>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// True once the loop has ended, by cancellation or a fatal error.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
