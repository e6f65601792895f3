//! Terminal demo of the star rating bar and the rating statistics view.
//!
//! Run the binary to browse the samples; styles come from the built-in
//! sheet overlaid with `$XDG_CONFIG_HOME/starbar/styles.conf`.

mod app;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use starbar::config::{self, StyleSheet};
use starbar::core::geometry::LayoutDirection;
use starbar::ui::{
    layout::{centered, stacked_boxes, AppLayout},
    surface::{fit_view, px_to_cells, ViewSurface, DOTS_PER_COLUMN, DOTS_PER_ROW},
    theme::Theme,
};
use starbar::widget::view::{MeasureSpec, View};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler, samples,
    state::{AppState, Sample, SavedSession},
};

const HINT: &str = "Tab: sample | ↑/↓: focus | ←/→: rate | f: feed | r: direction | q: quit";

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Star rating bar and statistics demo")]
struct Cli {
    /// Sample to open (defaults to the last one shown).
    #[arg(long, value_enum)]
    sample: Option<Sample>,

    /// Start in right-to-left layout.
    #[arg(long)]
    rtl: bool,

    /// Style sheet to load instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session file to restore from and save to.
    #[arg(long)]
    state: Option<PathBuf>,
}

// ───────────────────────────────────────── drawing ───────────

fn block<'a>(title: String, focused: bool, direction: LayoutDirection) -> Block<'a> {
    let alignment = match direction {
        LayoutDirection::Ltr => Alignment::Left,
        LayoutDirection::Rtl => Alignment::Right,
    };
    Block::default()
        .title(title)
        .title_alignment(alignment)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        })
}

fn draw_ratings(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let rows: Vec<u16> = state
        .ratings
        .iter()
        .map(|s| px_to_cells(s.bar.star_size(), DOTS_PER_ROW).max(1))
        .collect();
    let boxes = stacked_boxes(area, &rows);

    let previous = std::mem::take(&mut state.bar_areas);
    let direction = state.direction;
    for (i, (sample, &bounds)) in state.ratings.iter_mut().zip(&boxes).enumerate() {
        let title = format!(
            " {} · {:.1}/{} ",
            sample.title,
            sample.bar.rating(),
            sample.bar.star_count()
        );
        let block = block(title, i == state.focused, direction);
        let inner = block.inner(bounds);
        fit_view(&mut sample.bar, inner, previous.get(i).copied());

        state.bar_areas.push(inner);
        frame.render_widget(ViewSurface::new(&sample.bar).block(block), bounds);
    }
}

fn draw_statistics(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let view = &mut state.statistics;
    let (width, height) = view.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
    let columns = px_to_cells(width, DOTS_PER_COLUMN) + 2;
    let rows = px_to_cells(height, DOTS_PER_ROW) + 2;
    let bounds = centered(columns, rows, area);

    let block = block(" Rating statistics ".into(), true, state.direction);
    let inner = block.inner(bounds);
    fit_view(&mut *view, inner, state.statistics_area);
    state.statistics_area = Some(inner);
    frame.render_widget(ViewSurface::new(&*view).block(block), bounds);
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    match state.sample {
        Sample::Rating => draw_ratings(frame, layout.sample_area, state),
        Sample::Statistics => draw_statistics(frame, layout.sample_area, state),
    }

    let status_text = state.status_message.as_deref().unwrap_or(HINT);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── build widgets ─────────────────────────────────────────
    let sheet = StyleSheet::load(cli.config.as_deref());
    let ratings = samples::rating_samples(&sheet)?;
    let statistics = samples::statistics_view(&sheet)?;
    let mut state = AppState::new(ratings, statistics);

    let state_path = cli.state.clone().unwrap_or_else(config::state_path);
    match SavedSession::load(&state_path) {
        Ok(Some(session)) => state.restore(&session),
        Ok(None) => {}
        Err(err) => tracing::warn!("ignoring saved session: {err:#}"),
    }
    if let Some(sample) = cli.sample {
        state.sample = sample;
    }
    if cli.rtl {
        state.set_direction(LayoutDirection::Rtl);
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        if state.take_redraw() {
            terminal.draw(|frame| draw(frame, &mut state))?;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Pointer(p) => handler::handle_pointer(&mut state, p),
            AppEvent::Resize(_, _) => state.dirty = true,
            AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    state
        .session()
        .save(&state_path)
        .context("saving session")?;

    Ok(())
}
