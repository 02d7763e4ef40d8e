//! Converts crossterm mouse events into the board's pointer stream.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use lanes_domain::PointerSample;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Sample(PointerSample),
    /// Wheel notch; positive scrolls down.
    Wheel { x: f64, y: f64, notches: f64 },
}

#[derive(Debug)]
pub struct PointerTranslator {
    started: Instant,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Milliseconds since the translator was created.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn translate(&self, event: &MouseEvent) -> Option<PointerInput> {
        let now = self.now_ms();
        self.translate_at(event, now)
    }

    /// Cells map to their centre point so row math never lands on an edge.
    pub fn translate_at(&self, event: &MouseEvent, timestamp_ms: u64) -> Option<PointerInput> {
        let x = event.column as f64 + 0.5;
        let y = event.row as f64 + 0.5;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                Some(PointerInput::Sample(PointerSample::pressed(x, y, timestamp_ms)))
            }
            // A plain move after a press means the release happened outside
            // the terminal, so it reads as a release too.
            MouseEventKind::Up(MouseButton::Left) | MouseEventKind::Moved => {
                Some(PointerInput::Sample(PointerSample::released(x, y, timestamp_ms)))
            }
            MouseEventKind::ScrollDown => Some(PointerInput::Wheel { x, y, notches: 1.0 }),
            MouseEventKind::ScrollUp => Some(PointerInput::Wheel { x, y, notches: -1.0 }),
            _ => None,
        }
    }
}

impl Default for PointerTranslator {
    fn default() -> Self {
        Self::new()
    }
}
