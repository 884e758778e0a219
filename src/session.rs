//! Feed submission and polling start-up.
//!
//! A [`Session`] ties the shared [`App`] to a transport. Submitting the first
//! feed successfully starts the [`PollingCycle`], which then runs for the
//! rest of the session. [`SubmitQueue`] feeds it URLs one at a time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::app::App;
use crate::dispatch::Renderer;
use crate::error::Result;
use crate::i18n::Localizer;
use crate::poll::{PollHandle, PollingCycle, SharedApp};
use crate::source::Transport;
use crate::store::FeedId;

pub struct Session<T, R, L> {
    app: SharedApp<R, L>,
    transport: Rc<T>,
    interval: Duration,
    poller: RefCell<Option<PollHandle>>,
}

impl<T, R, L> Session<T, R, L>
where
    T: Transport + 'static,
    R: Renderer + 'static,
    L: Localizer + 'static,
{
    pub fn new(app: App<R, L>, transport: T, interval: Duration) -> Self {
        Self {
            app: Rc::new(RefCell::new(app)),
            transport: Rc::new(transport),
            interval,
            poller: RefCell::new(None),
        }
    }

    pub fn app(&self) -> &SharedApp<R, L> {
        &self.app
    }

    /// Handle one form submission.
    ///
    /// Must run inside a [`tokio::task::LocalSet`] because a first successful
    /// feed spawns the polling task.
    pub async fn submit(&self, url: &str) -> Result<FeedId> {
        let url = url.trim();
        {
            let mut app = self.app.borrow_mut();
            app.validate(url)?;
            app.begin_loading()?;
        }

        let payload = self.transport.fetch(url).await;
        let feed_id = self.app.borrow_mut().finish_loading(url, payload)?;

        if self.app.borrow().store().feeds().len() == 1 {
            self.start_polling();
        }
        Ok(feed_id)
    }

    fn start_polling(&self) {
        info!("first feed added");
        let cycle = PollingCycle::new(self.app.clone(), self.transport.clone(), self.interval);
        *self.poller.borrow_mut() = Some(cycle.spawn());
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .borrow()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// True when polling was started and its task has since ended.
    pub fn polling_stopped(&self) -> bool {
        self.poller
            .borrow()
            .as_ref()
            .is_some_and(PollHandle::is_finished)
    }

    pub fn shutdown(&self) {
        if let Some(handle) = self.poller.borrow_mut().take() {
            handle.cancel();
        }
    }
}

/// Submits queued URLs to a [`Session`] one at a time, so a load never
/// overlaps another.
///
/// Rejected submissions are logged and the queue moves on. A fatal error
/// ends the queue's task; check [`is_stopped()`](SubmitQueue::is_stopped).
pub struct SubmitQueue {
    urls: mpsc::UnboundedSender<String>,
    task: JoinHandle<Result<()>>,
}

impl SubmitQueue {
    /// Start the queue on the current [`tokio::task::LocalSet`].
    pub fn spawn<T, R, L>(session: Rc<Session<T, R, L>>) -> Self
    where
        T: Transport + 'static,
        R: Renderer + 'static,
        L: Localizer + 'static,
    {
        let (urls, mut pending) = mpsc::unbounded_channel::<String>();
        let task = tokio::task::spawn_local(async move {
            while let Some(url) = pending.recv().await {
                match session.submit(&url).await {
                    Ok(feed_id) => info!(%feed_id, url = %url, "feed subscribed"),
                    Err(e) if e.is_fatal() => {
                        error!(error = %e, "submission hit an impossible state");
                        return Err(e);
                    }
                    Err(e) => info!(url = %url, error = %e, "submission rejected"),
                }
            }
            Ok(())
        });
        Self { urls, task }
    }

    pub fn push(&self, url: String) {
        if self.urls.send(url).is_err() {
            warn!("submission queue has stopped");
        }
    }

    /// True once the queue's task has ended.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}
