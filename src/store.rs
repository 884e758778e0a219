//! The state store: feeds, posts, FSM states and UI flags.
//!
//! Fields are private. Every mutation goes through a setter that returns the
//! [`Change`] it caused, or `None` when the value did not actually change.
//! Callers hand changes to the dispatcher; the store itself never renders.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::fsm::{LoadState, PollingState, ValidationState};
use crate::source::{ParsedFeed, RawItem};

/// Identifier of a [`Feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedId(pub u64);

/// Identifier of a [`Post`]. Its string form is what the post list exposes
/// as `data-id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub u64);

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subscribed feed. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: FeedId,
    pub url: String,
    pub title: String,
    pub description: String,
}

/// One item discovered in a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    /// The feed that produced this post.
    pub feed_id: FeedId,
    pub guid: Option<String>,
    pub pub_date: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Post {
    /// Publication time, if the raw date is RFC 2822 or RFC 3339.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.pub_date.as_deref()?.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A mutation, named by its logical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Validation {
        previous: Option<ValidationState>,
        current: ValidationState,
    },
    Loading {
        previous: Option<LoadState>,
        current: LoadState,
    },
    Polling {
        previous: PollingState,
        current: PollingState,
    },
    ViewedPosts {
        added: PostId,
    },
    ModalPost {
        previous: Option<PostId>,
        current: PostId,
    },
    Feeds,
    Posts {
        added: usize,
    },
}

impl Change {
    pub fn path(&self) -> &'static str {
        match self {
            Change::Validation { .. } => "validation",
            Change::Loading { .. } => "loading",
            Change::Polling { .. } => "updating",
            Change::ViewedPosts { .. } => "ui.viewedPostIds",
            Change::ModalPost { .. } => "modal.postId",
            Change::Feeds => "feeds",
            Change::Posts { .. } => "posts",
        }
    }
}

/// The single source of truth.
#[derive(Debug)]
pub struct Store {
    validation: Option<ValidationState>,
    loading: Option<LoadState>,
    polling: PollingState,
    modal_post_id: Option<PostId>,
    viewed_post_ids: HashSet<PostId>,
    feeds: Vec<Feed>,
    posts: Vec<Post>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            validation: None,
            loading: None,
            polling: PollingState::Idle,
            modal_post_id: None,
            viewed_post_ids: HashSet::new(),
            feeds: Vec::new(),
            posts: Vec::new(),
            next_id: 1,
        }
    }

    // -- reads ---------------------------------------------------------------

    pub fn validation(&self) -> Option<ValidationState> {
        self.validation
    }

    pub fn loading(&self) -> Option<LoadState> {
        self.loading
    }

    pub fn polling(&self) -> PollingState {
        self.polling
    }

    pub fn modal_post_id(&self) -> Option<PostId> {
        self.modal_post_id
    }

    pub fn modal_post(&self) -> Option<&Post> {
        self.modal_post_id.and_then(|id| self.post(id))
    }

    pub fn is_viewed(&self, id: PostId) -> bool {
        self.viewed_post_ids.contains(&id)
    }

    /// Feeds, most recently added first.
    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    /// Posts, newest batch first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    // -- construction --------------------------------------------------------

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a feed record (not yet added) for a freshly parsed document.
    pub fn new_feed(&mut self, url: &str, parsed: &ParsedFeed) -> Feed {
        Feed {
            id: FeedId(self.next_id()),
            url: url.to_string(),
            title: parsed.title.clone(),
            description: parsed.description.clone(),
        }
    }

    /// Map parsed items to posts tagged with `feed_id`, each with a fresh id.
    pub fn build_posts(&mut self, feed_id: FeedId, items: Vec<RawItem>) -> Vec<Post> {
        items
            .into_iter()
            .map(|item| Post {
                id: PostId(self.next_id()),
                feed_id,
                guid: item.guid,
                pub_date: item.pub_date,
                link: item.link,
                title: item.title,
                description: item.description,
            })
            .collect()
    }

    // -- mutations -----------------------------------------------------------

    pub fn set_validation(&mut self, state: ValidationState) -> Option<Change> {
        let previous = self.validation.replace(state);
        (previous != Some(state)).then_some(Change::Validation {
            previous,
            current: state,
        })
    }

    pub fn set_loading(&mut self, state: LoadState) -> Option<Change> {
        let previous = self.loading.replace(state);
        (previous != Some(state)).then_some(Change::Loading {
            previous,
            current: state,
        })
    }

    pub fn set_polling(&mut self, state: PollingState) -> Option<Change> {
        let previous = std::mem::replace(&mut self.polling, state);
        (previous != state).then_some(Change::Polling {
            previous,
            current: state,
        })
    }

    pub fn set_modal_post(&mut self, id: PostId) -> Option<Change> {
        let previous = self.modal_post_id.replace(id);
        (previous != Some(id)).then_some(Change::ModalPost {
            previous,
            current: id,
        })
    }

    pub fn mark_viewed(&mut self, id: PostId) -> Option<Change> {
        self.viewed_post_ids
            .insert(id)
            .then_some(Change::ViewedPosts { added: id })
    }

    pub fn add_feed(&mut self, feed: Feed) -> Change {
        self.feeds.insert(0, feed);
        Change::Feeds
    }

    /// Put `posts` in front of the existing ones, keeping their order.
    pub fn prepend_posts(&mut self, posts: Vec<Post>) -> Option<Change> {
        if posts.is_empty() {
            return None;
        }
        let added = posts.len();
        self.posts.splice(0..0, posts);
        Some(Change::Posts { added })
    }
}
