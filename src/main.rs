//! rss-aggregator binary: parse args, load config and locale, set up the
//! terminal, and run the event loop.

use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::task::LocalSet;
use tracing::info;

use rss_aggregator::app::App;
use rss_aggregator::config::{Cli, Config};
use rss_aggregator::i18n::I18n;
use rss_aggregator::input::{self, Command};
use rss_aggregator::logging;
use rss_aggregator::session::{Session, SubmitQueue};
use rss_aggregator::source::HttpTransport;
use rss_aggregator::ui::{self, Screen};
use rss_aggregator::view::TuiView;

type ReaderSession = Session<HttpTransport, TuiView, I18n>;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    logging::init(&config.logging)?;

    // Localization first, then the application.
    let i18n = I18n::bundled(&config.locale)
        .with_context(|| format!("cannot load locale {}", config.locale))?;
    info!(locale = i18n.locale(), "localization ready");
    let transport = HttpTransport::new(&config.http)?;
    let app = App::new(TuiView::default(), i18n);
    let session = Rc::new(Session::new(app, transport, config.polling.interval()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();

    install_panic_hook();
    local.block_on(&runtime, run(session, cli.feeds))
}

async fn run(session: Rc<ReaderSession>, initial_feeds: Vec<String>) -> Result<()> {
    let submissions = SubmitQueue::spawn(session.clone());
    for url in initial_feeds {
        submissions.push(url);
    }

    let mut guard = TerminalGuard::new()?;
    let mut screen = Screen::new();

    // ~10 fps. Each iteration draws, then drains pending keys without
    // blocking so background fetches keep making progress.
    let mut frames = tokio::time::interval(Duration::from_millis(100));

    loop {
        frames.tick().await;

        {
            let app = session.app().borrow();
            guard
                .terminal
                .draw(|f| ui::draw(&mut screen, app.renderer(), f))?;
        }

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let command = {
                let app = session.app().borrow();
                input::handle_key_event(&mut screen, app.renderer(), key)
            };
            match command {
                Some(Command::Submit(url)) => submissions.push(url),
                Some(Command::Preview(id)) => session.app().borrow_mut().select_post(&id)?,
                None => {}
            }
        }

        if session.polling_stopped() {
            anyhow::bail!("feed polling stopped unexpectedly; see the log for details");
        }
        if submissions.is_stopped() {
            anyhow::bail!("feed submission stopped unexpectedly; see the log for details");
        }
        if screen.quit {
            break;
        }
    }

    info!(polling = session.is_polling(), "shutting down");
    session.shutdown();
    Ok(())
}
