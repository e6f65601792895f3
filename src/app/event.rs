//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Only
//! left-button mouse activity is forwarded; it drives the rating bars the
//! way a touch would.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// Touch-like phase of a left-button gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Drag,
    Release,
}

/// A left-button gesture step at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    pub fn from_mouse(mouse: MouseEvent) -> Option<Self> {
        let phase = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Press,
            MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Drag,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Release,
            _ => return None,
        };
        Some(Self {
            phase,
            column: mouse.column,
            row: mouse.row,
        })
    }
}

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    fn from_crossterm(event: CtEvent) -> Option<Self> {
        match event {
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => PointerEvent::from_mouse(m).map(AppEvent::Pointer),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            // Poll with the tick rate so ticks keep flowing while idle.
            let app_event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read().ok().and_then(AppEvent::from_crossterm) {
                    Some(ev) => ev,
                    None => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
