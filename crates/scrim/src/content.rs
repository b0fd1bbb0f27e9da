#![forbid(unsafe_code)]

//! Caller-supplied popup content.

use scrim_core::event::PointerEvent;
use scrim_core::geometry::{Point, Size};

/// A caller-owned visual handle hosted by an overlay container.
///
/// The engine never looks inside content: it centers the content within the
/// container using `size`, drives `set_offset` while a slide transition is
/// in flight, and forwards pointer events that land inside the content's
/// rest bounds while input is accepted.
///
/// Invariants:
/// - `size` must stay constant between the layout-settle step and the end
///   of the open cycle; transitions capture it once.
/// - A content handle may be hosted by at most one container at a time;
///   opening it twice concurrently is rejected.
pub trait Content {
    /// Content footprint used for layout and hit classification.
    fn size(&self) -> Size;

    /// Transition-driven translation away from the rest position. Reset to
    /// `Point::ZERO` when the exit phase completes.
    fn set_offset(&self, _offset: Point) {}

    /// A pointer event forwarded by the hosting container.
    fn pointer(&self, _event: &PointerEvent) {}
}
