#![forbid(unsafe_code)]

//! Pointer and key events delivered to the engine by the host platform.

use crate::geometry::Point;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer (touch/mouse) event.
///
/// `origin` is where the gesture first went down; for `Down` events it
/// equals `position`. Containers classify `Down` events by origin and
/// `Move`/`Up` events by live position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub origin: Point,
}

impl PointerEvent {
    /// A gesture start; the origin is the down position.
    #[must_use]
    pub const fn down(position: Point) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
            origin: position,
        }
    }

    #[must_use]
    pub const fn moved(position: Point, origin: Point) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            origin,
        }
    }

    #[must_use]
    pub const fn up(position: Point, origin: Point) -> Self {
        Self {
            phase: PointerPhase::Up,
            position,
            origin,
        }
    }
}

/// A raw platform key event. Codes are platform-dependent and matched
/// against a configurable binding table, never interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u32,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self { code }
    }
}
