//! Format-neutral output of the feed parser.
//!
//! RSS `<item>` and Atom `<entry>` elements are both normalised into
//! [`RawItem`], and a whole document into [`ParsedFeed`]. Nothing here has an
//! identity yet: ids and the owning feed are assigned when items become posts.

/// One `<item>` / `<entry>` as found in the payload.
///
/// Every field is optional because providers populate them inconsistently.
/// Empty text counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,
    /// Raw publication date text, kept verbatim so identity comparison sees
    /// exactly what the provider sent.
    pub pub_date: Option<String>,
}

impl RawItem {
    /// Build an item, dropping empty or whitespace-only fields.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        link: Option<String>,
        guid: Option<String>,
        pub_date: Option<String>,
    ) -> Self {
        Self {
            title: present(title),
            description: present(description),
            link: present(link),
            guid: present(guid),
            pub_date: present(pub_date),
        }
    }
}

/// A parsed feed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: String,
    pub description: String,
    pub items: Vec<RawItem>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_absent() {
        let item = RawItem::new(
            Some("Title".into()),
            Some("   ".into()),
            Some(String::new()),
            None,
            Some("Mon, 01 Jan 2024 00:00:00 +0000".into()),
        );
        assert_eq!(item.title.as_deref(), Some("Title"));
        assert!(item.description.is_none());
        assert!(item.link.is_none());
        assert!(item.guid.is_none());
        assert!(item.pub_date.is_some());
    }
}
