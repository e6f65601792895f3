//! Core algorithms – star outlines, rating quantization and statistics layout.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! function here is pure geometry over pixel coordinates.

pub mod geometry;
pub mod rating;
pub mod star_path;
pub mod statistics;
