//! Colour-state lists: one colour per interaction state, like a themed
//! widget tint.

use ratatui::style::Color;

/// Interaction state of a view, used to pick a tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub disabled: bool,
    pub pressed: bool,
    pub focused: bool,
    pub selected: bool,
    pub checked: bool,
}

impl ViewState {
    /// Every "active" state at once; used to derive the highlight colour.
    pub const ACTIVATED: ViewState = ViewState {
        disabled: false,
        pressed: true,
        focused: true,
        selected: true,
        checked: true,
    };
}

/// Maps [`ViewState`]s to colours.  Unset states fall back to `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TintList {
    pub default: Color,
    pub disabled: Option<Color>,
    pub pressed: Option<Color>,
    pub focused: Option<Color>,
    pub selected: Option<Color>,
    pub checked: Option<Color>,
}

impl TintList {
    /// A tint that never changes with state.
    pub const fn uniform(color: Color) -> Self {
        Self {
            default: color,
            disabled: None,
            pressed: None,
            focused: None,
            selected: None,
            checked: None,
        }
    }

    pub fn with_pressed(mut self, color: Color) -> Self {
        self.pressed = Some(color);
        self
    }

    pub fn with_focused(mut self, color: Color) -> Self {
        self.focused = Some(color);
        self
    }

    /// Resolve a colour; the first matching state wins in the order
    /// disabled, pressed, focused, selected, checked.
    pub fn color_for(&self, state: ViewState) -> Color {
        if state.disabled {
            return self.disabled.unwrap_or(self.default);
        }
        self.state_color(state).unwrap_or(self.default)
    }

    /// Colour of the highlight layer, if the list defines one for an
    /// active state.
    pub fn activated_color(&self) -> Option<Color> {
        self.state_color(ViewState::ACTIVATED)
    }

    fn state_color(&self, state: ViewState) -> Option<Color> {
        [
            (state.pressed, self.pressed),
            (state.focused, self.focused),
            (state.selected, self.selected),
            (state.checked, self.checked),
        ]
        .into_iter()
        .find_map(|(active, color)| if active { color } else { None })
    }
}

impl Default for TintList {
    fn default() -> Self {
        Self::uniform(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_tint_ignores_state() {
        let tint = TintList::uniform(Color::Gray);
        assert_eq!(tint.color_for(ViewState::ACTIVATED), Color::Gray);
        assert_eq!(tint.activated_color(), None);
    }

    #[test]
    fn pressed_wins_over_focused() {
        let tint = TintList::uniform(Color::Gray)
            .with_focused(Color::Blue)
            .with_pressed(Color::Yellow);
        let state = ViewState {
            pressed: true,
            focused: true,
            ..Default::default()
        };
        assert_eq!(tint.color_for(state), Color::Yellow);
        assert_eq!(tint.activated_color(), Some(Color::Yellow));
    }

    #[test]
    fn disabled_falls_back_to_default() {
        let tint = TintList::uniform(Color::Gray).with_pressed(Color::Yellow);
        let state = ViewState {
            disabled: true,
            pressed: true,
            ..Default::default()
        };
        assert_eq!(tint.color_for(state), Color::Gray);
    }
}
