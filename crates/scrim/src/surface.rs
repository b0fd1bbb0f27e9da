#![forbid(unsafe_code)]

//! Root surface hosting overlay containers.
//!
//! The surface is the mount point the orchestrator attaches containers to.
//! It routes pointer events to the topmost overlay only and fans raw key
//! events out to every subscriber. It renders nothing itself.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::broadcast;

use scrim_core::event::{KeyEvent, PointerEvent};
use scrim_core::geometry::Size;

use crate::container::{OverlayContainer, PointerDisposition};
use crate::content::Content;

const KEY_CHANNEL_CAPACITY: usize = 32;

/// The surface overlays are mounted onto.
///
/// Invariants:
/// - Children are kept in mount order; the most recently added container is
///   the topmost and the only one that receives pointer input.
/// - Key events reach every live subscriber. Matched dismiss keys are not
///   removed from the stream; subscribers are independent.
pub struct RootSurface {
    size: Cell<Size>,
    children: RefCell<Vec<Rc<OverlayContainer>>>,
    keys: broadcast::Sender<KeyEvent>,
}

impl RootSurface {
    #[must_use]
    pub fn new(size: Size) -> Rc<Self> {
        let (keys, _) = broadcast::channel(KEY_CHANNEL_CAPACITY);
        Rc::new(Self {
            size: Cell::new(size),
            children: RefCell::new(Vec::new()),
            keys,
        })
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Resize the surface. Containers pick the new size up on their next
    /// layout pass; an open popup keeps its settled size for the rest of
    /// its cycle.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    /// Mount a container as the topmost child.
    pub fn add_child(&self, container: Rc<OverlayContainer>) {
        self.children.borrow_mut().push(container);
    }

    /// Unmount a container. Idempotent.
    pub fn remove_child(&self, container: &Rc<OverlayContainer>) {
        self.children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, container));
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Whether `content` is currently attached to any mounted container.
    pub(crate) fn is_content_mounted(&self, content: &Rc<dyn Content>) -> bool {
        self.children
            .borrow()
            .iter()
            .any(|child| child.holds(content))
    }

    /// Deliver a pointer event to the topmost overlay.
    ///
    /// Returns the routing outcome, or `None` when no overlay is mounted
    /// (the event belongs to whatever is underneath).
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> Option<PointerDisposition> {
        let top = self.children.borrow().last().cloned()?;
        Some(top.route_pointer(event))
    }

    /// Broadcast a raw key event to all subscribers.
    pub fn dispatch_key(&self, event: KeyEvent) {
        // Send fails only when nobody is subscribed; keys are droppable then.
        let _ = self.keys.send(event);
    }

    /// Subscribe to the raw key-event stream.
    #[must_use]
    pub fn subscribe_keys(&self) -> broadcast::Receiver<KeyEvent> {
        self.keys.subscribe()
    }
}
