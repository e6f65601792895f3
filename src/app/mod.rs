//! Demo application: state, event plumbing, input handling.

pub mod event;
pub mod handler;
pub mod samples;
pub mod state;
