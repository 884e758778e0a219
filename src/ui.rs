//! Terminal UI rendering.
//!
//! [`Screen`] holds state that only matters to the terminal (selection,
//! input buffer, whether the preview is open). [`draw`] paints one frame from
//! a [`Screen`] and the [`TuiView`] the dispatcher keeps up to date.
//!
//! Layout, top to bottom: URL input, feedback line, posts | feeds, status bar.
//! The preview is drawn as a centred overlay.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::dispatch::FeedbackKind;
use crate::view::TuiView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Editing,
}

pub struct Screen {
    pub mode: Mode,
    /// URL being typed.
    pub input: String,
    pub list_state: ListState,
    /// Whether the preview overlay is shown.
    pub preview_open: bool,
    pub quit: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            input: String::new(),
            list_state: ListState::default(),
            preview_open: false,
            quit: false,
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self, len: usize) {
        if len > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self, len: usize) {
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}

/// Draw the complete UI for one frame.
pub fn draw(screen: &mut Screen, view: &TuiView, frame: &mut Frame) {
    let [input_area, feedback_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [posts_area, feeds_area] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
            .areas(main_area);

    draw_input(screen, view, frame, input_area);
    draw_feedback(view, frame, feedback_area);
    draw_posts(screen, view, frame, posts_area);
    draw_feeds(view, frame, feeds_area);
    draw_status_bar(view, frame, status_area);

    if screen.preview_open {
        draw_preview(view, frame);
    }
}

fn draw_input(screen: &Screen, view: &TuiView, frame: &mut Frame, area: Rect) {
    let border = if !view.input_valid {
        Color::Red
    } else if screen.mode == Mode::Editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let title = if view.input_locked {
        " RSS link (loading…) "
    } else {
        " RSS link "
    };

    let text = if screen.input.is_empty() && screen.mode == Mode::Normal {
        Span::styled(
            "press a to add a feed",
            Style::default().fg(Color::DarkGray),
        )
    } else if screen.mode == Mode::Editing && !view.input_locked {
        Span::raw(format!("{}▏", screen.input))
    } else {
        Span::raw(screen.input.as_str())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, area);
}

fn draw_feedback(view: &TuiView, frame: &mut Frame, area: Rect) {
    let Some(feedback) = &view.feedback else {
        return;
    };
    let color = match feedback.kind {
        FeedbackKind::Success => Color::Green,
        FeedbackKind::Error => Color::Red,
    };
    let line = Line::from(Span::styled(
        format!(" {}", feedback.message),
        Style::default().fg(color),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the scrollable post list.
fn draw_posts(screen: &mut Screen, view: &TuiView, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = view
        .posts
        .iter()
        .map(|post| {
            let date = post.date.as_deref().unwrap_or("no date");
            let weight = if post.viewed {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{date:<17}"), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(post.title.as_str(), weight),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", post.feed_title),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Posts ").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut screen.list_state);
}

fn draw_feeds(view: &TuiView, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = view
        .feeds
        .iter()
        .map(|feed| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    feed.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    feed.description.as_str(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Feeds ").borders(Borders::ALL));
    frame.render_widget(list, area);
}

/// Render the bottom status bar.
fn draw_status_bar(view: &TuiView, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{} feeds", view.feeds.len()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} posts", view.posts.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  a: add  enter/p: preview  ↑/↓: scroll  q: quit"),
    ]));
    frame.render_widget(status, area);
}

fn draw_preview(view: &TuiView, frame: &mut Frame) {
    let Some(modal) = &view.modal else {
        return;
    };
    let area = centered(frame.area(), 70, 60);

    let mut lines = vec![Line::from(modal.body.as_str()), Line::raw("")];
    if let Some(link) = &modal.link {
        lines.push(Line::from(Span::styled(
            link.as_str(),
            Style::default().fg(Color::Cyan),
        )));
    }

    let preview = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {} ", modal.title))
            .title_bottom(" esc: close ")
            .borders(Borders::ALL),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(preview, area);
}

/// A rectangle of the given percentage size centred in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
