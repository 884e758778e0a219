//! Application controller: the store plus the dispatcher.
//!
//! Everything here is synchronous. Network I/O happens in [`crate::session`]
//! and [`crate::poll`], which call into [`App`] before and after awaiting, so
//! store mutations never interleave.

use tracing::{debug, info, warn};

use crate::dedupe::dedupe;
use crate::dispatch::{Dispatcher, Renderer};
use crate::error::{Error, FeedError, Result, TransitionError};
use crate::fsm::{LoadState, PollingState, ValidationState};
use crate::i18n::Localizer;
use crate::source::parse_feed;
use crate::store::{Change, FeedId, PostId, Store};
use crate::validate::{is_url_unique, is_valid_url};

pub struct App<R, L> {
    store: Store,
    dispatcher: Dispatcher<R, L>,
}

impl<R: Renderer, L: Localizer> App<R, L> {
    pub fn new(renderer: R, localizer: L) -> Self {
        Self {
            store: Store::new(),
            dispatcher: Dispatcher::new(renderer, localizer),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        self.dispatcher.renderer()
    }

    fn commit(&mut self, change: Option<Change>) -> std::result::Result<(), TransitionError> {
        match change {
            Some(change) => self.dispatcher.dispatch(&self.store, &change),
            None => Ok(()),
        }
    }

    // -- submission ----------------------------------------------------------

    /// Run the validation machine for a submitted URL.
    pub fn validate(&mut self, url: &str) -> Result<()> {
        let change = self.store.set_validation(ValidationState::ValidatingForm);
        self.commit(change)?;
        if !is_valid_url(url) {
            let change = self.store.set_validation(ValidationState::Failed);
            self.commit(change)?;
            return Err(Error::InvalidUrl(url.to_string()));
        }

        let change = self.store.set_validation(ValidationState::ValidatingUniqueness);
        self.commit(change)?;
        let known = self.store.feeds().iter().map(|f| f.url.as_str());
        if !is_url_unique(url, known) {
            let change = self.store.set_validation(ValidationState::Failed);
            self.commit(change)?;
            return Err(Error::DuplicateUrl(url.to_string()));
        }

        let change = self.store.set_validation(ValidationState::Passed);
        self.commit(change)?;
        Ok(())
    }

    /// Enter `requesting` before the initial fetch of a submitted feed.
    pub fn begin_loading(&mut self) -> Result<()> {
        let change = self.store.set_loading(LoadState::Requesting);
        self.commit(change)?;
        Ok(())
    }

    /// Finish the initial load with whatever the transport returned.
    ///
    /// On success the feed and its posts go to the front of their lists.
    pub fn finish_loading(
        &mut self,
        url: &str,
        payload: std::result::Result<Vec<u8>, FeedError>,
    ) -> Result<FeedId> {
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => return self.fail_loading(e),
        };

        let change = self.store.set_loading(LoadState::Parsing);
        self.commit(change)?;
        let parsed = match parse_feed(&payload) {
            Ok(parsed) => parsed,
            Err(e) => return self.fail_loading(e),
        };

        let feed = self.store.new_feed(url, &parsed);
        let feed_id = feed.id;
        let posts = self.store.build_posts(feed_id, parsed.items);
        info!(%feed_id, url, posts = posts.len(), "feed added");

        let change = self.store.add_feed(feed);
        self.commit(Some(change))?;
        let change = self.store.prepend_posts(posts);
        self.commit(change)?;
        let change = self.store.set_loading(LoadState::Finished);
        self.commit(change)?;
        Ok(feed_id)
    }

    fn fail_loading(&mut self, error: FeedError) -> Result<FeedId> {
        warn!(%error, "feed load failed");
        let change = self.store.set_loading(LoadState::Failed);
        self.commit(change)?;
        Err(error.into())
    }

    // -- polling -------------------------------------------------------------

    /// Start a tick: enter `updating` and snapshot the tracked feeds.
    pub fn begin_tick(&mut self) -> std::result::Result<Vec<(FeedId, String)>, TransitionError> {
        let change = self.store.set_polling(PollingState::Updating);
        self.commit(change)?;
        Ok(self
            .store
            .feeds()
            .iter()
            .map(|f| (f.id, f.url.clone()))
            .collect())
    }

    /// Merge the settled fetches of one tick. Returns the number of new posts.
    ///
    /// Failed fetches and unparseable payloads are dropped per feed. Posts
    /// from all feeds are de-duplicated together against every known post;
    /// only a non-empty result enters `updated`.
    pub fn merge_tick(
        &mut self,
        fetched: Vec<(FeedId, std::result::Result<Vec<u8>, FeedError>)>,
    ) -> std::result::Result<usize, TransitionError> {
        let mut candidates = Vec::new();
        for (feed_id, payload) in fetched {
            match payload.and_then(|p| parse_feed(&p)) {
                Ok(parsed) => {
                    let posts = self.store.build_posts(feed_id, parsed.items);
                    candidates.extend(posts);
                }
                Err(error) => warn!(%feed_id, %error, "skipping feed this tick"),
            }
        }

        let fresh = dedupe(candidates, self.store.posts());
        let count = fresh.len();
        if count == 0 {
            debug!("tick found no new posts");
            return Ok(0);
        }

        info!(count, "new posts");
        let change = self.store.prepend_posts(fresh);
        self.commit(change)?;
        let change = self.store.set_polling(PollingState::Updated);
        self.commit(change)?;
        Ok(count)
    }

    // -- interaction ---------------------------------------------------------

    /// Preview the post named by a rendered `data-id`, then mark it viewed.
    ///
    /// Ids that are empty, malformed or unknown are ignored.
    pub fn select_post(&mut self, data_id: &str) -> std::result::Result<(), TransitionError> {
        let Ok(raw) = data_id.trim().parse::<u64>() else {
            return Ok(());
        };
        let id = PostId(raw);
        if self.store.post(id).is_none() {
            return Ok(());
        }

        let change = self.store.set_modal_post(id);
        self.commit(change)?;
        let change = self.store.mark_viewed(id);
        self.commit(change)
    }
}
