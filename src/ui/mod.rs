//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the widget layer's views and turns them into braille
//! cells on the terminal.  No file I/O happens here.

pub mod layout;
pub mod surface;
pub mod theme;
