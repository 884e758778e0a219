//! Terminal implementation of [`Renderer`].
//!
//! The dispatcher calls into [`TuiView`] when state transitions happen; the
//! view turns the store into display rows, and [`crate::ui`] draws those rows
//! every frame. Nothing here touches the terminal directly.

use crate::dispatch::{Feedback, Renderer};
use crate::store::{PostId, Store};

/// One line of the feed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub title: String,
    pub description: String,
}

/// One line of the post list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: PostId,
    pub title: String,
    /// Formatted publication date, if the post has a parseable one.
    pub date: Option<String>,
    pub feed_title: String,
    /// Viewed posts are drawn in normal weight, unviewed ones in bold.
    pub viewed: bool,
}

/// Content of the post preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub body: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TuiView {
    pub feeds: Vec<FeedRow>,
    pub posts: Vec<PostRow>,
    pub modal: Option<ModalView>,
    pub input_valid: bool,
    pub input_locked: bool,
    pub feedback: Option<Feedback>,
}

impl Default for TuiView {
    fn default() -> Self {
        Self {
            feeds: Vec::new(),
            posts: Vec::new(),
            modal: None,
            input_valid: true,
            input_locked: false,
            feedback: None,
        }
    }
}

impl Renderer for TuiView {
    fn render_feeds(&mut self, store: &Store) {
        self.feeds = store
            .feeds()
            .iter()
            .map(|feed| FeedRow {
                title: feed.title.clone(),
                description: feed.description.clone(),
            })
            .collect();
    }

    fn render_posts(&mut self, store: &Store) {
        self.posts = store
            .posts()
            .iter()
            .map(|post| PostRow {
                id: post.id,
                title: post.title.clone().unwrap_or_else(|| "(untitled)".into()),
                date: post
                    .published()
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string()),
                feed_title: store
                    .feeds()
                    .iter()
                    .find(|f| f.id == post.feed_id)
                    .map(|f| f.title.clone())
                    .unwrap_or_default(),
                viewed: store.is_viewed(post.id),
            })
            .collect();
    }

    fn render_modal(&mut self, store: &Store) {
        self.modal = store.modal_post().map(|post| ModalView {
            title: post.title.clone().unwrap_or_default(),
            body: post.description.clone().unwrap_or_default(),
            link: post.link.clone(),
        });
    }

    fn render_input(&mut self, valid: bool) {
        self.input_valid = valid;
    }

    fn render_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
    }

    fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    fn lock_input(&mut self, locked: bool) {
        self.input_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::i18n::I18n;

    fn rss() -> Vec<u8> {
        r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>News</title><description>Daily</description>
<item><guid>1</guid><title>Dated</title><pubDate>Mon, 01 Jan 2024 10:30:00 +0000</pubDate>
<description>Body text</description><link>https://example.com/1</link></item>
<item><guid>2</guid></item>
</channel></rss>"#
            .as_bytes()
            .to_vec()
    }

    fn loaded() -> App<TuiView, I18n> {
        let mut app = App::new(TuiView::default(), I18n::bundled("en").unwrap());
        app.validate("https://example.com/rss").unwrap();
        app.begin_loading().unwrap();
        app.finish_loading("https://example.com/rss", Ok(rss()))
            .unwrap();
        app
    }

    #[test]
    fn finished_load_fills_rows() {
        let app = loaded();
        let view = app.renderer();

        assert_eq!(
            view.feeds,
            vec![FeedRow {
                title: "News".into(),
                description: "Daily".into(),
            }]
        );
        assert_eq!(view.posts.len(), 2);
        assert_eq!(view.posts[0].title, "Dated");
        assert_eq!(view.posts[0].date.as_deref(), Some("2024-01-01 10:30"));
        assert_eq!(view.posts[0].feed_title, "News");
        assert_eq!(view.posts[1].title, "(untitled)");
        assert!(view.posts.iter().all(|p| !p.viewed));
        assert!(!view.input_locked);
        assert_eq!(
            view.feedback.as_ref().map(|f| f.message.as_str()),
            Some("Rss has been loaded")
        );
    }

    #[test]
    fn selecting_a_post_fills_modal_and_marks_row_viewed() {
        let mut app = loaded();
        let id = app.renderer().posts[0].id;

        app.select_post(&id.to_string()).unwrap();

        let view = app.renderer();
        assert_eq!(
            view.modal,
            Some(ModalView {
                title: "Dated".into(),
                body: "Body text".into(),
                link: Some("https://example.com/1".into()),
            })
        );
        assert!(view.posts[0].viewed);
        assert!(!view.posts[1].viewed);
    }

    #[test]
    fn invalid_submission_marks_input() {
        let mut app = loaded();
        assert!(app.validate("nope").is_err());
        assert!(!app.renderer().input_valid);

        app.validate("https://other.example/rss").unwrap();
        assert!(app.renderer().input_valid);
        assert!(app.renderer().feedback.is_none());
    }
}
