//! Style sheets: widget attributes loaded from a text file.
//!
//! Styles are stored as a simple sectioned key-value file at
//! `$XDG_CONFIG_HOME/starbar/styles.conf` (default
//! `~/.config/starbar/styles.conf`).  Every `[rating_bar]` section describes
//! one rating bar of the demo, `[statistics_view]` describes the statistics
//! sample.  A section kind present in the user file replaces the built-in
//! sections of that kind; keys missing from a section take the widget
//! defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ratatui::style::Color;

use crate::core::rating::{RatingBarConfig, RatingMode};
use crate::core::star_path::{Somatotype, StarAppearance};
use crate::core::statistics::StatisticsStyle;
use crate::error::{Error, Result};

pub const RATING_BAR: &str = "rating_bar";
pub const STATISTICS_VIEW: &str = "statistics_view";

/// Not TOML: section headers repeat.
const STYLE_FILE: &str = "styles.conf";

/// Styles shipped with the demo.
pub const DEFAULT_STYLES: &str = r#"
[rating_bar]
title = "Thin stars, half steps"
star_count = 5
star_size = 12
star_margin = 4
step_size = 0.5
rating_star_count = 2.5

[rating_bar]
title = "Fat hollow stars, whole steps"
star_size = 12
star_margin = 4
star_somatotype = fat
star_hollowed = true
star_outline_width = 1
star_tint_pressed = light_yellow
step_size = 1
rating_star_count = 3

[rating_bar]
title = "Rounded corners, tenth steps"
star_size = 12
star_margin = 4
star_corner_rounded = true
star_corner_radius = 2
step_size = 0.1
rating_star_count = 3.7

[rating_bar]
title = "Indicative"
bar_mode = indicative
star_size = 12
star_margin = 4
rating_star_count = 4

[rating_bar]
title = "Custom drawable"
star = diamond
star_count = 7
star_size = 8
star_margin = 4
step_size = 0.5
rating_star_count = 1.5

[statistics_view]
row_count = 5
star_size = 8
star_margin = 2
row_margin = 4
column_margin = 4
percentage_bar_width = 60
statistics_data = "0.62, 0.21, 0.09, 0.05, 0.03"
"#;

// ───────────────────────────────────────── sections ──────────

/// One `[name]` block of `key = value` entries, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style entry.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.push((key.to_string(), value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value of `key`; a repeated key reads its last value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn invalid(&self, key: &str, value: &str, expected: &str) -> Error {
        Error::Config(format!(
            "[{}] {key}: expected {expected}, got {value:?}",
            self.name
        ))
    }

    fn parsed<T: FromStr>(&self, key: &str, expected: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|_| self.invalid(key, value, expected)),
        }
    }

    pub fn get_f32(&self, key: &str) -> Result<Option<f32>> {
        let value = self.parsed::<f32>(key, "a number")?;
        match value {
            Some(v) if !v.is_finite() => Err(self.invalid(key, &v.to_string(), "a finite number")),
            other => Ok(other),
        }
    }

    pub fn get_u32(&self, key: &str) -> Result<Option<u32>> {
        self.parsed(key, "a whole number")
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.parsed(key, "true or false")
    }

    /// Colour names (`yellow`, `dark_gray`) or `#rrggbb`.
    pub fn get_color(&self, key: &str) -> Result<Option<Color>> {
        self.parsed(key, "a colour")
    }

    // ── widget attributes ───────────────────────────────────────

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// Name of a user drawable (`star = diamond`).
    pub fn star_drawable(&self) -> Option<&str> {
        self.get("star")
    }

    pub fn star_appearance(&self) -> Result<StarAppearance> {
        let defaults = StarAppearance::default();
        let somatotype = match self.get("star_somatotype") {
            None => defaults.somatotype,
            Some(value) => Somatotype::parse(value)
                .ok_or_else(|| self.invalid("star_somatotype", value, "thin or fat"))?,
        };
        Ok(StarAppearance {
            somatotype,
            hollowed: self.get_bool("star_hollowed")?.unwrap_or(defaults.hollowed),
            outline_width: self
                .get_f32("star_outline_width")?
                .unwrap_or(defaults.outline_width),
            corner_rounded: self
                .get_bool("star_corner_rounded")?
                .unwrap_or(defaults.corner_rounded),
            corner_radius: self
                .get_f32("star_corner_radius")?
                .unwrap_or(defaults.corner_radius),
        })
    }

    /// Initial rating, `0` when unset.
    pub fn rating_star_count(&self) -> Result<f32> {
        Ok(self.get_f32("rating_star_count")?.unwrap_or(0.0))
    }

    pub fn drag_slop(&self) -> Result<Option<f32>> {
        self.get_f32("drag_slop")
    }

    /// The literal `statistics_data` string, unparsed.
    pub fn statistics_data(&self) -> Option<&str> {
        self.get("statistics_data")
    }
}

impl RatingBarConfig {
    pub fn from_style(section: &Section) -> Result<Self> {
        let defaults = RatingBarConfig::default();
        let mode = match section.get("bar_mode") {
            None => defaults.mode,
            Some(value) => RatingMode::parse(value)
                .ok_or_else(|| section.invalid("bar_mode", value, "interactive or indicative"))?,
        };
        Ok(RatingBarConfig {
            mode,
            star_count: section.get_u32("star_count")?.unwrap_or(defaults.star_count),
            star_size: section.get_f32("star_size")?.unwrap_or(defaults.star_size),
            star_margin: section.get_f32("star_margin")?.unwrap_or(defaults.star_margin),
            step_size: section.get_f32("step_size")?.unwrap_or(defaults.step_size),
        })
    }
}

impl StatisticsStyle {
    pub fn from_style(section: &Section) -> Result<Self> {
        let defaults = StatisticsStyle::default();
        let row_count = match section.get_u32("row_count")? {
            Some(n) => n as usize,
            None => defaults.row_count,
        };
        Ok(StatisticsStyle {
            row_count,
            star_size: section.get_f32("star_size")?.unwrap_or(defaults.star_size),
            star_margin: section.get_f32("star_margin")?.unwrap_or(defaults.star_margin),
            row_margin: section.get_f32("row_margin")?.unwrap_or(defaults.row_margin),
            column_margin: section
                .get_f32("column_margin")?
                .unwrap_or(defaults.column_margin),
            labels_enabled: !section
                .get_bool("column_digital_disabled")?
                .unwrap_or(!defaults.labels_enabled),
            bar_width: section.get_f32("percentage_bar_width")?.or(defaults.bar_width),
            bar_height: section.get_f32("percentage_bar_height")?.or(defaults.bar_height),
            bar_corner_rounded: section
                .get_bool("percentage_bar_corner_rounded")?
                .unwrap_or(defaults.bar_corner_rounded),
            bar_corner_radius: section
                .get_f32("percentage_bar_corner_radius")?
                .or(defaults.bar_corner_radius),
        })
    }
}

// ───────────────────────────────────────── sheet ─────────────

/// All sections of a style file, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    sections: Vec<Section>,
}

impl StyleSheet {
    /// The built-in demo styles.
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_STYLES)
    }

    /// Built-in styles overlaid with the user file at `path` (or the default
    /// location).  An unreadable file leaves the built-in styles in place.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        let builtin = Self::builtin();
        if !path.exists() {
            return builtin;
        }
        match Self::read(&path) {
            Ok(user) => {
                tracing::debug!(path = %path.display(), "loaded style sheet");
                builtin.overlay(user)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "style sheet unreadable, using defaults");
                builtin
            }
        }
    }

    /// Read a style file without the built-in styles.
    pub fn read(path: &Path) -> Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    pub fn parse(s: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for (number, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push(Section::new(name.trim()));
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = number + 1, text = line, "ignoring malformed style line");
                continue;
            };
            let Some(section) = sections.last_mut() else {
                tracing::warn!(line = number + 1, "ignoring style entry outside a section");
                continue;
            };
            let value = value.trim().trim_matches('"');
            section.entries.push((key.trim().to_string(), value.to_string()));
        }

        Self { sections }
    }

    /// Every section kind present in `user` replaces this sheet's sections of
    /// the same kind.
    pub fn overlay(mut self, user: StyleSheet) -> Self {
        self.sections
            .retain(|base| !user.sections.iter().any(|s| s.name == base.name));
        self.sections.extend(user.sections);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn rating_bars(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.name == RATING_BAR)
    }

    /// The first `[statistics_view]` section.
    pub fn statistics_view(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == STATISTICS_VIEW)
    }
}

/// Return the style file path (`$XDG_CONFIG_HOME/starbar/styles.conf`).
pub fn config_path() -> PathBuf {
    config_dir().join(STYLE_FILE)
}

/// Return the saved-session path (`$XDG_CONFIG_HOME/starbar/state.json`).
pub fn state_path() -> PathBuf {
    config_dir().join("state.json")
}

fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    base.join(env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_sections_in_order() {
        let sheet = StyleSheet::parse(
            "# comment\n[rating_bar]\nstar_count = 3\n\n[statistics_view]\nstatistics_data = \"0.5, 0.5\"\n[rating_bar]\n",
        );
        let names: Vec<_> = sheet.sections().iter().map(Section::name).collect();
        assert_eq!(names, [RATING_BAR, STATISTICS_VIEW, RATING_BAR]);
        assert_eq!(sheet.rating_bars().count(), 2);
        assert_eq!(
            sheet.statistics_view().and_then(Section::statistics_data),
            Some("0.5, 0.5")
        );
    }

    #[test]
    fn entries_outside_a_section_and_junk_lines_are_skipped() {
        let sheet = StyleSheet::parse("star_count = 3\n[rating_bar]\nnot a pair\nstar_size = 6\n");
        assert_eq!(sheet.sections().len(), 1);
        assert_eq!(sheet.sections()[0].get("star_size"), Some("6"));
        assert_eq!(sheet.sections()[0].get("star_count"), None);
    }

    #[test]
    fn builtin_styles_all_build() {
        let sheet = StyleSheet::builtin();
        assert_eq!(sheet.rating_bars().count(), 5);
        for section in sheet.rating_bars() {
            RatingBarConfig::from_style(section).unwrap();
            section.star_appearance().unwrap();
            section.rating_star_count().unwrap();
        }
        let stats = sheet.statistics_view().unwrap();
        assert_eq!(StatisticsStyle::from_style(stats).unwrap().star_size, 8.0);
    }

    #[test]
    fn rating_bar_attributes_map_to_config() {
        let section = Section::new(RATING_BAR)
            .with("bar_mode", "indicative")
            .with("star_count", "7")
            .with("step_size", "0.25");
        let config = RatingBarConfig::from_style(&section).unwrap();
        assert_eq!(config.mode, RatingMode::Indicative);
        assert_eq!(config.star_count, 7);
        assert_eq!(config.step_size, 0.25);
        assert_eq!(config.star_size, RatingBarConfig::default().star_size);
    }

    #[test]
    fn appearance_attributes() {
        let section = Section::new(RATING_BAR)
            .with("star_somatotype", "fat")
            .with("star_hollowed", "true")
            .with("star_outline_width", "2");
        let appearance = section.star_appearance().unwrap();
        assert_eq!(appearance.somatotype, Somatotype::Fat);
        assert!(appearance.hollowed);
        assert_eq!(appearance.outline_width, 2.0);
        assert!(!appearance.corner_rounded);
    }

    #[test]
    fn statistics_attributes() {
        let section = Section::new(STATISTICS_VIEW)
            .with("column_digital_disabled", "true")
            .with("percentage_bar_height", "3")
            .with("percentage_bar_corner_rounded", "false");
        let style = StatisticsStyle::from_style(&section).unwrap();
        assert!(!style.labels_enabled);
        assert_eq!(style.bar_height, Some(3.0));
        assert_eq!(style.resolved_corner_radius(), 0.0);
    }

    #[rstest]
    #[case("star_count", "many")]
    #[case("star_size", "big")]
    #[case("star_size", "inf")]
    #[case("bar_mode", "sometimes")]
    fn bad_values_are_config_errors(#[case] key: &str, #[case] value: &str) {
        let section = Section::new(RATING_BAR).with(key, value);
        let err = RatingBarConfig::from_style(&section).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains(key)));
    }

    #[test]
    fn colours_parse_by_name() {
        let section = Section::new(STATISTICS_VIEW).with("percentage_bar_color", "light_blue");
        assert_eq!(
            section.get_color("percentage_bar_color").unwrap(),
            Some(Color::LightBlue)
        );
    }

    #[test]
    fn user_sections_replace_builtin_kinds() {
        let user = StyleSheet::parse("[rating_bar]\nstar_count = 2\n");
        let sheet = StyleSheet::builtin().overlay(user);
        assert_eq!(sheet.rating_bars().count(), 1);
        assert!(sheet.statistics_view().is_some());
    }

    #[test]
    fn style_and_session_files_share_a_directory() {
        let styles = config_path();
        assert_eq!(styles.file_name().unwrap(), "styles.conf");
        assert_eq!(styles.parent(), state_path().parent());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StyleSheet::read(Path::new("/nonexistent/starbar/styles.conf")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn last_repeated_key_wins() {
        let section = Section::new(RATING_BAR).with("star_count", "2").with("star_count", "4");
        assert_eq!(section.get_u32("star_count").unwrap(), Some(4));
    }
}
