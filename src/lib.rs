//! rss-aggregator: subscribe to RSS/Atom feeds and watch new posts arrive.
//!
//! ## Architecture overview
//!
//! ```text
//!  input.rs ──Command──► session.rs ──► app.rs ──Change──► dispatch.rs ──► view.rs
//!                           │             ▲  (store.rs)    (fsm.rs)          │
//!                           ▼             │                                  ▼
//!                        poll.rs ─────────┘                                ui.rs
//!                     (local task)                                       (draw)
//! ```
//!
//! * **`source/`**: the `Transport` trait, the HTTP transport and the
//!   RSS/Atom parser.
//! * **`store`**: feeds, posts and FSM states; every mutation yields a
//!   `Change`.
//! * **`dispatch`**: runs the side effects for each `Change`.
//! * **`dedupe`**: post identity and de-duplication.
//! * **`app`** / **`session`** / **`poll`**: submission, loading and the
//!   polling cycle.
//! * **`view`** / **`ui`** / **`input`**: the terminal front-end.
//! * **`config`** / **`logging`** / **`i18n`**: ambient setup used by the
//!   binary.

pub mod app;
pub mod config;
pub mod dedupe;
pub mod dispatch;
pub mod error;
pub mod fsm;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod poll;
pub mod session;
pub mod source;
pub mod store;
pub mod ui;
pub mod validate;
pub mod view;

pub use error::{Error, FeedError, Result, TransitionError};
