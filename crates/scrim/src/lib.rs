#![forbid(unsafe_code)]

//! Scrim: a modal overlay lifecycle engine.
//!
//! Scrim mounts caller-supplied popup content onto a [`RootSurface`],
//! brackets the interactive period with an animated enter/exit
//! [`Transition`], gates input to everything behind the overlay, races the
//! auto-dismiss triggers (outside tap, escape key, back button), and
//! recycles overlay containers through a [`ContainerPool`].
//!
//! The engine renders nothing: it owns lifecycle, input routing, and the
//! animated properties (backdrop, opacity, content offset) that a host
//! renderer reads back each frame.
//!
//! # Lifecycle guarantees
//!
//! - The enter phase completes before input is unblocked; the exit phase
//!   completes before the container is detached and pooled.
//! - Teardown runs in strict reverse setup order on every exit path:
//!   normal close, auto-dismiss, body error, or cooperative cancellation.
//! - Exactly one dismiss cause is recorded per cycle, and only after the
//!   teardown finishes.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use scrim::{open, ContainerPool, OpenOptions, RootSurface, Transition};
//! use scrim_core::geometry::Size;
//!
//! let surface = RootSurface::new(Size::new(800.0, 600.0));
//! let pool = ContainerPool::new();
//!
//! let outcome = open(
//!     &surface,
//!     &pool,
//!     dialog.clone(),
//!     OpenOptions::new().transition(Transition::slide()),
//!     |_dismiss| async move { dialog.wait_for_choice().await },
//! )
//! .await?;
//!
//! match outcome.cause() {
//!     Some(cause) => tracing::info!(?cause, "dialog dismissed itself"),
//!     None => tracing::info!(choice = ?outcome.output, "dialog closed"),
//! }
//! ```

pub mod anim;
pub mod container;
pub mod content;
pub mod dismiss;
pub mod open;
pub mod pool;
pub mod surface;
pub mod transition;
mod unwind;

pub use anim::Easing;
pub use container::{OverlayContainer, PointerDisposition};
pub use content::Content;
pub use dismiss::{AutoDismiss, DismissCause, DismissKeys};
pub use open::{OpenOptions, Outcome, open};
pub use pool::ContainerPool;
pub use surface::RootSurface;
pub use transition::{
    DEFAULT_BACKDROP, Direction, FadeTransition, NoTransition, SlideTransition, Transition,
};
