#![forbid(unsafe_code)]

//! Foundation types for the Scrim overlay engine: surface-space geometry,
//! colors, pointer/key events, and the shared error type.

pub mod color;
pub mod error;
pub mod event;
pub mod geometry;

pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{KeyEvent, PointerEvent, PointerPhase};
pub use geometry::{Point, Rect, Size};
