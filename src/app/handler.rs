//! Input handling: maps key and pointer events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;

use starbar::core::geometry::LayoutDirection;
use starbar::core::rating::{RatingMode, TouchEvent};
use starbar::ui::surface::column_to_px;
use starbar::widget::view::View;

use super::event::{PointerEvent, PointerPhase};
use super::samples::FEED_DATA;
use super::state::{AppState, Sample};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    state.status_message = None;
    state.dirty = true;

    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Tab => {
            cancel_capture(state);
            state.sample = state.sample.toggled();
        }
        KeyCode::Char('r') => {
            cancel_capture(state);
            let direction = state.direction.toggled();
            state.set_direction(direction);
            state.status_message = Some(match direction {
                LayoutDirection::Ltr => "left-to-right".into(),
                LayoutDirection::Rtl => "right-to-left".into(),
            });
        }
        KeyCode::Char('f') => {
            state.statistics.feed(&FEED_DATA);
            state.status_message = Some("statistics fed".into());
        }
        KeyCode::Up if state.sample == Sample::Rating => state.move_focus(-1),
        KeyCode::Down if state.sample == Sample::Rating => state.move_focus(1),
        KeyCode::Left | KeyCode::Right if state.sample == Sample::Rating => {
            // Arrows follow the fill direction.
            let forward = (key.code == KeyCode::Right) != state.direction.is_rtl();
            step_focused(state, if forward { 1 } else { -1 });
        }
        _ => {}
    }
}

fn step_focused(state: &mut AppState, steps: i32) {
    let Some(sample) = state.focused_sample() else {
        return;
    };
    if sample.bar.mode() == RatingMode::Indicative {
        let message = format!("\"{}\" is read-only", sample.title);
        state.status_message = Some(message);
        return;
    }
    sample.bar.step_by(steps);
}

/// Process a left-button gesture step.  A press over a rating bar captures
/// the pointer for that bar until release, like a touch stream.
pub fn handle_pointer(state: &mut AppState, pointer: PointerEvent) {
    if state.sample != Sample::Rating {
        return;
    }

    match pointer.phase {
        PointerPhase::Press => {
            cancel_capture(state);
            let Some(index) = state
                .bar_areas
                .iter()
                .position(|&area| point_in_rect(area, pointer.column, pointer.row))
            else {
                return;
            };
            state.focus(index);
            let x = column_to_px(state.bar_areas[index], pointer.column);
            if state.ratings[index].bar.handle_event(&TouchEvent::Down { x }) {
                state.captured = Some(index);
            }
        }
        PointerPhase::Drag => {
            if let Some((index, area)) = captured_area(state) {
                let x = column_to_px(area, pointer.column);
                state.ratings[index].bar.handle_event(&TouchEvent::Move { x });
            }
        }
        PointerPhase::Release => {
            if let Some((index, area)) = captured_area(state) {
                let x = column_to_px(area, pointer.column);
                state.ratings[index].bar.handle_event(&TouchEvent::Up { x });
            }
            state.captured = None;
        }
    }
}

fn captured_area(state: &AppState) -> Option<(usize, Rect)> {
    let index = state.captured?;
    let area = *state.bar_areas.get(index)?;
    (index < state.ratings.len()).then_some((index, area))
}

/// Abandon an in-flight gesture; the bar keeps its last rating.
fn cancel_capture(state: &mut AppState) {
    if let Some(index) = state.captured.take() {
        if let Some(sample) = state.ratings.get_mut(index) {
            sample.bar.handle_event(&TouchEvent::Cancel);
        }
    }
}

fn point_in_rect(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::samples;
    use starbar::config::StyleSheet;

    /// The built-in bars, each 40 cells wide in a 3-row box.
    fn demo_state() -> AppState {
        let sheet = StyleSheet::builtin();
        let mut state = AppState::new(
            samples::rating_samples(&sheet).unwrap(),
            samples::statistics_view(&sheet).unwrap(),
        );
        state.bar_areas = (0..state.ratings.len() as u16)
            .map(|i| Rect::new(1, 1 + i * 5, 40, 3))
            .collect();
        for sample in &mut state.ratings {
            sample.bar.layout(80.0, 12.0);
        }
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pointer(phase: PointerPhase, column: u16, row: u16) -> PointerEvent {
        PointerEvent { phase, column, row }
    }

    #[test]
    fn drag_across_a_bar_rates_it() {
        let mut state = demo_state();
        handle_pointer(&mut state, pointer(PointerPhase::Press, 1, 2));
        assert_eq!(state.captured, Some(0));
        handle_pointer(&mut state, pointer(PointerPhase::Drag, 9, 2));
        // Leaving the bar vertically keeps the capture.
        handle_pointer(&mut state, pointer(PointerPhase::Release, 9, 30));
        assert_eq!(state.captured, None);
        assert_eq!(state.ratings[0].bar.rating(), 1.5);
    }

    #[test]
    fn press_focuses_the_bar_under_the_pointer() {
        let mut state = demo_state();
        handle_pointer(&mut state, pointer(PointerPhase::Press, 5, 7));
        assert_eq!(state.focused, 1);
        assert_eq!(state.captured, Some(1));
    }

    #[test]
    fn indicative_bar_is_never_captured() {
        let mut state = demo_state();
        handle_pointer(&mut state, pointer(PointerPhase::Press, 1, 17));
        assert_eq!(state.focused, 3);
        assert_eq!(state.captured, None);
        handle_pointer(&mut state, pointer(PointerPhase::Release, 1, 17));
        assert_eq!(state.ratings[3].bar.rating(), 4.0);
    }

    #[test]
    fn pointer_is_ignored_on_the_statistics_sample() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.sample, Sample::Statistics);
        handle_pointer(&mut state, pointer(PointerPhase::Press, 1, 2));
        assert_eq!(state.captured, None);
    }

    #[test]
    fn tab_cancels_a_gesture_in_flight() {
        let mut state = demo_state();
        handle_pointer(&mut state, pointer(PointerPhase::Press, 1, 2));
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.captured, None);
        assert!(!state.ratings[0].bar.engine().is_dragging());
        assert_eq!(state.ratings[0].bar.rating(), 2.5);
    }

    #[test]
    fn arrows_follow_the_fill_direction() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.ratings[0].bar.rating(), 3.0);

        handle_key(&mut state, key(KeyCode::Char('r')));
        assert!(state.direction.is_rtl());
        handle_key(&mut state, key(KeyCode::Right));
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.ratings[0].bar.rating(), 2.0);
    }

    #[test]
    fn indicative_bar_ignores_arrows() {
        let mut state = demo_state();
        state.focus(3);
        handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.ratings[3].bar.rating(), 4.0);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn f_feeds_the_statistics_sample() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Char('f')));
        let labels: Vec<_> = state.statistics.rows().iter().map(|r| r.label.clone()).collect();
        assert_eq!(labels, ["100.0%", "90.0%", "30.0%", "20.0%", "0.5%"]);
    }

    #[test]
    fn quit_keys() {
        let mut state = demo_state();
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);

        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);
    }
}
