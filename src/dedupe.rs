//! Post identity and de-duplication.
//!
//! Providers fill `pubDate`, `guid`, `link` and `title` inconsistently, so
//! identity is decided by a single field: the first one present on the
//! candidate post, in the priority order of [`IdentityField`].

use crate::store::Post;

/// Fields that can identify a post, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    PubDate,
    Guid,
    Link,
    Title,
}

impl IdentityField {
    const PRIORITY: [IdentityField; 4] = [
        IdentityField::PubDate,
        IdentityField::Guid,
        IdentityField::Link,
        IdentityField::Title,
    ];

    /// The first field present on `post`, if any.
    pub fn resolve(post: &Post) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|field| field.value(post).is_some())
    }

    pub fn value(self, post: &Post) -> Option<&str> {
        match self {
            IdentityField::PubDate => post.pub_date.as_deref(),
            IdentityField::Guid => post.guid.as_deref(),
            IdentityField::Link => post.link.as_deref(),
            IdentityField::Title => post.title.as_deref(),
        }
    }
}

/// Whether `a` and `b` are the same item.
///
/// The field is chosen on `a` only; `b` must carry the same value in that
/// field. A post with none of the identity fields is identical to every
/// post, so such items never survive [`dedupe`] against a non-empty list.
pub fn identical(a: &Post, b: &Post) -> bool {
    match IdentityField::resolve(a) {
        Some(field) => field.value(a) == field.value(b),
        None => true,
    }
}

/// The candidates that are not identical to any known post, in order.
pub fn dedupe(candidates: Vec<Post>, known: &[Post]) -> Vec<Post> {
    candidates
        .into_iter()
        .filter(|candidate| !known.iter().any(|k| identical(candidate, k)))
        .collect()
}
