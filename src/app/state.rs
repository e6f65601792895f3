//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::Path;

use anyhow::{Context, Result};
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use starbar::core::geometry::LayoutDirection;
use starbar::widget::saved_state::{self, RatingBarState, StatisticsState};
use starbar::widget::view::View;
use starbar::widget::StatisticsView;

use super::samples::RatingSample;

/// Which sample screen is shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Sample {
    #[default]
    Rating,
    Statistics,
}

impl Sample {
    pub fn toggled(self) -> Self {
        match self {
            Sample::Rating => Sample::Statistics,
            Sample::Statistics => Sample::Rating,
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub sample: Sample,
    pub ratings: Vec<RatingSample>,
    pub statistics: StatisticsView,
    /// Index of the rating bar that receives arrow keys.
    pub focused: usize,
    pub direction: LayoutDirection,
    /// Rating bar holding the pointer between press and release.
    pub captured: Option<usize>,
    /// Inner area of each rating bar in the last frame, for hit testing.
    pub bar_areas: Vec<Rect>,
    /// Inner area the statistics view was last laid out in.
    pub statistics_area: Option<Rect>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Set by handlers when the frame must be redrawn regardless of widgets.
    pub dirty: bool,
}

impl AppState {
    pub fn new(ratings: Vec<RatingSample>, statistics: StatisticsView) -> Self {
        let mut state = Self {
            sample: Sample::default(),
            ratings,
            statistics,
            focused: 0,
            direction: LayoutDirection::Ltr,
            captured: None,
            bar_areas: Vec::new(),
            statistics_area: None,
            should_quit: false,
            status_message: None,
            dirty: true,
        };
        state.sync_focus();
        state
    }

    pub fn focused_sample(&mut self) -> Option<&mut RatingSample> {
        self.ratings.get_mut(self.focused)
    }

    /// Move focus by `delta` bars, clamped to the list.
    pub fn move_focus(&mut self, delta: isize) {
        if self.ratings.is_empty() {
            return;
        }
        let last = self.ratings.len() - 1;
        self.focused = self.focused.saturating_add_signed(delta).min(last);
        self.sync_focus();
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.ratings.len() {
            self.focused = index;
            self.sync_focus();
        }
    }

    fn sync_focus(&mut self) {
        for (i, sample) in self.ratings.iter_mut().enumerate() {
            sample.bar.set_focused(i == self.focused);
        }
        self.dirty = true;
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
        for sample in &mut self.ratings {
            sample.bar.set_layout_direction(direction);
        }
        self.statistics.set_layout_direction(direction);
    }

    /// Whether anything changed since the last frame.  Consumes every
    /// pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        let mut redraw = std::mem::take(&mut self.dirty);
        for sample in &mut self.ratings {
            redraw |= sample.bar.invalidation().take_redraw();
        }
        redraw |= self.statistics.invalidation().take_redraw();
        redraw
    }

    // ── session ─────────────────────────────────────────────────

    pub fn session(&self) -> SavedSession {
        SavedSession {
            sample: self.sample,
            rtl: self.direction.is_rtl(),
            focused: self.focused,
            ratings: self.ratings.iter().map(|s| s.bar.save_state()).collect(),
            statistics: Some(self.statistics.save_state()),
        }
    }

    /// Apply a saved session.  Bars beyond the saved list keep their styled
    /// rating.
    pub fn restore(&mut self, session: &SavedSession) {
        self.sample = session.sample;
        self.set_direction(if session.rtl {
            LayoutDirection::Rtl
        } else {
            LayoutDirection::Ltr
        });
        for (sample, saved) in self.ratings.iter_mut().zip(&session.ratings) {
            sample.bar.restore_state(saved);
        }
        if let Some(statistics) = &session.statistics {
            self.statistics.restore_state(statistics);
        }
        self.focus(session.focused);
    }
}

/// Everything persisted between runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedSession {
    pub sample: Sample,
    pub rtl: bool,
    pub focused: usize,
    pub ratings: Vec<RatingBarState>,
    pub statistics: Option<StatisticsState>,
}

impl SavedSession {
    /// `Ok(None)` when no session was saved yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let session = saved_state::deserialize(&text)
            .with_context(|| format!("decoding {}", path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, saved_state::serialize(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
