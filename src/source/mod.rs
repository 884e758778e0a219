//! Feed collaborators: transport and parser.
//!
//! The engine only sees the [`Transport`] trait and [`parse_feed`]. The
//! production transport is [`HttpTransport`]; tests plug in scripted ones.
//!
//! ## For contributors: adding a transport
//!
//! 1. Create a new file in this directory (e.g. `file.rs`).
//! 2. Implement [`Transport`] for your type.
//! 3. Add `mod file;` below and re-export the type.

mod feed_item;
mod http;
mod parser;

pub use feed_item::{ParsedFeed, RawItem};
pub use http::HttpTransport;
pub use parser::parse_feed;

use async_trait::async_trait;

use crate::error::FeedError;

/// Delivers the raw payload behind a feed URL.
///
/// Payloads are undecoded bytes; the parser honours the encoding declared in
/// the XML prolog. The polling cycle calls [`fetch()`](Transport::fetch) for
/// every tracked feed concurrently. Failures must be reported as
/// [`FeedError::Network`].
#[async_trait(?Send)]
pub trait Transport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError>;
}
