//! Host-facing widgets built on the core algorithms.
//!
//! Widgets draw through the [`canvas::Canvas`] trait and are driven by a
//! host through [`view::View`]; they never talk to the terminal directly.

pub mod canvas;
pub mod drawable;
pub mod rating_bar;
pub mod saved_state;
pub mod statistics_view;
pub mod tint;
pub mod view;

pub use rating_bar::RatingBar;
pub use statistics_view::StatisticsView;
