#![forbid(unsafe_code)]

//! Overlay container: hosts one popup content on the root surface, gates
//! input, and reports outside interactions.
//!
//! Invariants:
//! - At most one content is attached at a time; `attach` on an occupied
//!   container fails with `InvalidState`.
//! - Every pointer event delivered to a mounted container is consumed; the
//!   surface behind the overlay never receives pointer input.
//! - While the input gate is closed (the initial and pooled state), events
//!   are absorbed without reaching the content.
//!
//! Outside classification uses one rule per pointer phase: `Down` events
//! classify by gesture origin, `Move`/`Up` events forward by live position
//! and never raise the outside notification.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::Notify;
use tokio::sync::futures::Notified;

use scrim_core::color::Rgba;
use scrim_core::error::{Error, Result};
use scrim_core::event::{PointerEvent, PointerPhase};
use scrim_core::geometry::{Rect, Size};

use crate::content::Content;

/// How a container routed a pointer event. Every variant means the event
/// was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDisposition {
    /// The input gate is closed; the event was absorbed.
    Blocked,
    /// Delivered to the hosted content.
    Content,
    /// A `Down` landed on the scrim outside the content; the
    /// outside-interaction notification was raised.
    Outside,
    /// A `Move`/`Up` outside the content: consumed without delivery.
    Scrim,
}

/// The host of a single popup on the root surface.
pub struct OverlayContainer {
    content: RefCell<Option<Rc<dyn Content>>>,
    input_blocked: Cell<bool>,
    backdrop: Cell<Option<Rgba>>,
    opacity: Cell<f32>,
    bounds: Cell<Rect>,
    outside: Notify,
}

impl OverlayContainer {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            content: RefCell::new(None),
            input_blocked: Cell::new(true),
            backdrop: Cell::new(None),
            opacity: Cell::new(1.0),
            bounds: Cell::new(Rect::ZERO),
            outside: Notify::new(),
        })
    }

    /// Mount `content` as the sole hosted child.
    pub fn attach(&self, content: Rc<dyn Content>) -> Result<()> {
        let mut slot = self.content.borrow_mut();
        if slot.is_some() {
            return Err(Error::InvalidState("container already holds a content"));
        }
        *slot = Some(content);
        Ok(())
    }

    /// Unmount the hosted content. No-op when nothing is attached.
    pub fn detach(&self) {
        self.content.borrow_mut().take();
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.borrow().is_some()
    }

    pub(crate) fn content(&self) -> Option<Rc<dyn Content>> {
        self.content.borrow().clone()
    }

    pub(crate) fn holds(&self, content: &Rc<dyn Content>) -> bool {
        self.content
            .borrow()
            .as_ref()
            .is_some_and(|held| Rc::ptr_eq(held, content))
    }

    pub fn set_input_blocked(&self, blocked: bool) {
        self.input_blocked.set(blocked);
    }

    #[must_use]
    pub fn input_blocked(&self) -> bool {
        self.input_blocked.get()
    }

    /// The scrim color behind the content, `None` while not drawn.
    #[must_use]
    pub fn backdrop(&self) -> Option<Rgba> {
        self.backdrop.get()
    }

    pub(crate) fn set_backdrop(&self, color: Option<Rgba>) {
        self.backdrop.set(color);
    }

    /// Whole-container opacity, animated by fade transitions.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    pub(crate) fn set_opacity(&self, value: f32) {
        self.opacity.set(value.clamp(0.0, 1.0));
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    /// Fit the container to the surface. Runs once layout settles; the
    /// resulting bounds stay constant for the rest of the open cycle.
    pub(crate) fn sync_layout(&self, surface: Size) {
        self.bounds
            .set(Rect::new(0.0, 0.0, surface.width, surface.height));
    }

    /// Rest rectangle of the hosted content: centered within the bounds.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        match self.content.borrow().as_ref() {
            Some(content) => self.bounds.get().centered(content.size()),
            None => Rect::ZERO,
        }
    }

    /// Route a pointer event and report where it went.
    pub fn route_pointer(&self, event: &PointerEvent) -> PointerDisposition {
        if self.input_blocked.get() {
            return PointerDisposition::Blocked;
        }
        let Some(content) = self.content() else {
            return PointerDisposition::Scrim;
        };
        let rect = self.bounds.get().centered(content.size());
        match event.phase {
            PointerPhase::Down => {
                if rect.contains(event.origin) {
                    content.pointer(event);
                    PointerDisposition::Content
                } else {
                    self.outside.notify_waiters();
                    PointerDisposition::Outside
                }
            }
            PointerPhase::Move | PointerPhase::Up => {
                if rect.contains(event.position) {
                    content.pointer(event);
                    PointerDisposition::Content
                } else {
                    PointerDisposition::Scrim
                }
            }
        }
    }

    /// Future resolving on the next outside interaction.
    ///
    /// Only waiters registered at notification time are woken; a tap with
    /// no armed watcher is dropped, so a pooled container cannot carry a
    /// stale signal into its next cycle.
    pub(crate) fn outside_interaction(&self) -> Notified<'_> {
        self.outside.notified()
    }

    /// Reset to the pooled-idle invariant: no content, gate closed,
    /// visuals cleared.
    pub(crate) fn reset(&self) {
        self.detach();
        self.input_blocked.set(true);
        self.backdrop.set(None);
        self.opacity.set(1.0);
        self.bounds.set(Rect::ZERO);
    }
}
