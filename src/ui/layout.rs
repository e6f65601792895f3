//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout with the sample pane and a bottom status bar.
pub struct AppLayout {
    pub sample_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // sample pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            sample_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// One bordered box per entry of `rows`, each that many cells tall inside
/// its border, stacked from the top of `area`.
pub fn stacked_boxes(area: Rect, rows: &[u16]) -> Vec<Rect> {
    let constraints = rows
        .iter()
        .map(|&r| Constraint::Length(r + 2))
        .chain(std::iter::once(Constraint::Min(0)));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    chunks.iter().take(rows.len()).copied().collect()
}

/// A `width × height` rect centred in `area`, shrunk to fit.
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_stack_from_the_top() {
        let boxes = stacked_boxes(Rect::new(0, 0, 20, 30), &[2, 3, 2]);
        let ys: Vec<_> = boxes.iter().map(|r| (r.y, r.height)).collect();
        assert_eq!(ys, [(0, 4), (4, 5), (9, 4)]);
    }

    #[test]
    fn centered_rect_fits_inside_small_areas() {
        assert_eq!(centered(10, 4, Rect::new(0, 0, 6, 2)), Rect::new(0, 0, 6, 2));
        assert_eq!(centered(4, 2, Rect::new(0, 0, 10, 6)), Rect::new(3, 2, 4, 2));
    }
}
