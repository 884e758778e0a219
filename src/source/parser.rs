//! Feed parser: RSS first, Atom as a fallback.
//!
//! RSS documents are read with the [`rss`] crate. Anything the RSS reader
//! rejects is handed to [`feed_rs`], and accepted only if it turns out to be
//! an Atom document. All other payloads are a [`FeedError::Parse`].
//!
//! Both readers take undecoded bytes and decode text with the encoding the
//! document declares.

use feed_rs::model::FeedType;

use super::{ParsedFeed, RawItem};
use crate::error::FeedError;

/// Parse a raw payload into a feed title, description and items.
pub fn parse_feed(payload: &[u8]) -> Result<ParsedFeed, FeedError> {
    match rss::Channel::read_from(payload) {
        Ok(channel) => Ok(parse_channel(&channel)),
        Err(rss_err) => {
            let feed = feed_rs::parser::parse(payload)
                .map_err(|e| FeedError::Parse(format!("{rss_err}; {e}")))?;
            if feed.feed_type != FeedType::Atom {
                return Err(FeedError::Parse(rss_err.to_string()));
            }
            Ok(parse_atom(feed))
        }
    }
}

/// Convert an already-read [`rss::Channel`].
///
/// Pure (no I/O) so tests can exercise the mapping directly.
pub fn parse_channel(channel: &rss::Channel) -> ParsedFeed {
    let items = channel
        .items()
        .iter()
        .map(|item| {
            RawItem::new(
                item.title().map(String::from),
                item.description().map(String::from),
                item.link().map(String::from),
                item.guid().map(|g| g.value().to_string()),
                item.pub_date().map(String::from),
            )
        })
        .collect();

    ParsedFeed {
        title: channel.title().to_string(),
        description: channel.description().to_string(),
        items,
    }
}

fn parse_atom(feed: feed_rs::model::Feed) -> ParsedFeed {
    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            RawItem::new(
                entry.title.map(|t| t.content),
                entry.summary.map(|t| t.content),
                entry.links.first().map(|l| l.href.clone()),
                Some(entry.id),
                entry.published.map(|d| d.to_rfc3339()),
            )
        })
        .collect();

    ParsedFeed {
        title: feed.title.map(|t| t.content).unwrap_or_default(),
        description: feed.description.map(|d| d.content).unwrap_or_default(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_extracts_rss_items() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <description>All the tests</description>
    <item>
      <title>First Post</title>
      <link>https://example.com/1</link>
      <guid>guid-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
      <description>First description</description>
    </item>
    <item>
      <title>Second Post</title>
      <link>https://example.com/2</link>
      <guid>guid-2</guid>
    </item>
  </channel>
</rss>"#;

        let feed = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(feed.title, "Test Feed");
        assert_eq!(feed.description, "All the tests");
        assert_eq!(feed.items.len(), 2);

        assert_eq!(feed.items[0].guid.as_deref(), Some("guid-1"));
        assert_eq!(feed.items[0].title.as_deref(), Some("First Post"));
        assert_eq!(feed.items[0].link.as_deref(), Some("https://example.com/1"));
        assert_eq!(
            feed.items[0].pub_date.as_deref(),
            Some("Mon, 01 Jan 2024 00:00:00 +0000")
        );
        assert_eq!(feed.items[0].description.as_deref(), Some("First description"));

        assert_eq!(feed.items[1].guid.as_deref(), Some("guid-2"));
        assert!(feed.items[1].pub_date.is_none());
        assert!(feed.items[1].description.is_none());
    }

    #[test]
    fn missing_fields_stay_absent() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <link>https://example.com/no-guid</link>
    </item>
  </channel>
</rss>"#;

        let feed = parse_feed(xml.as_bytes()).unwrap();
        let item = &feed.items[0];

        assert!(item.guid.is_none());
        assert!(item.title.is_none());
        assert_eq!(item.link.as_deref(), Some("https://example.com/no-guid"));
    }

    #[test]
    fn invalid_dates_are_kept_verbatim() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <item>
      <guid>g1</guid>
      <pubDate>not-a-real-date</pubDate>
    </item>
  </channel>
</rss>"#;

        let feed = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(feed.items[0].pub_date.as_deref(), Some("not-a-real-date"));
    }

    #[test]
    fn falls_back_to_atom_entries() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Feed</title>
  <id>urn:uuid:feed</id>
  <updated>2024-01-02T00:00:00Z</updated>
  <entry>
    <title>Atom Entry</title>
    <id>urn:uuid:entry-1</id>
    <link href="https://example.com/atom/1"/>
    <summary>Entry summary</summary>
    <published>2024-01-01T10:00:00Z</published>
    <updated>2024-01-01T10:00:00Z</updated>
  </entry>
</feed>"#;

        let feed = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(feed.title, "Atom Feed");
        assert_eq!(feed.items.len(), 1);
        let item = &feed.items[0];
        assert_eq!(item.title.as_deref(), Some("Atom Entry"));
        assert_eq!(item.guid.as_deref(), Some("urn:uuid:entry-1"));
        assert_eq!(item.link.as_deref(), Some("https://example.com/atom/1"));
        assert_eq!(item.description.as_deref(), Some("Entry summary"));
        assert!(item.pub_date.as_deref().unwrap().starts_with("2024-01-01T10:00:00"));
    }

    #[test]
    fn honours_encoding_declared_in_prolog() {
        let mut xml = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<rss version="2.0">
  <channel>
    <title>Caf"#
            .to_vec();
        xml.push(0xE9);
        xml.extend_from_slice(
            br#"</title>
    <item><guid>g1</guid><title>Cr"#,
        );
        xml.push(0xE8);
        xml.extend_from_slice(b"me</title></item>
  </channel>
</rss>");

        let feed = parse_feed(&xml).unwrap();

        assert_eq!(feed.title, "Caf\u{e9}");
        assert_eq!(feed.items[0].title.as_deref(), Some("Cr\u{e8}me"));
    }

    #[test]
    fn html_page_is_a_parse_error() {
        let html = "<!DOCTYPE html><html><body><p>not a feed</p></body></html>";
        assert!(matches!(parse_feed(html.as_bytes()), Err(FeedError::Parse(_))));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse_feed(b"{{{ nope"), Err(FeedError::Parse(_))));
    }
}
