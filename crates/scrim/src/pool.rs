#![forbid(unsafe_code)]

//! Reuse pool for overlay containers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

use crate::container::OverlayContainer;

/// Pool of idle overlay containers, reused across open cycles.
///
/// Cheap to clone; clones share the same pool. Idle containers hold no
/// content and have their input gate closed; `release` restores that
/// invariant before pooling.
#[derive(Clone, Default)]
pub struct ContainerPool {
    inner: Rc<PoolInner>,
}

#[derive(Default)]
struct PoolInner {
    idle: RefCell<Vec<Rc<OverlayContainer>>>,
    max_idle: Option<usize>,
    constructed: Cell<usize>,
}

impl ContainerPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool that keeps at most `max` idle containers; excess is discarded
    /// on release.
    #[must_use]
    pub fn with_max_idle(max: usize) -> Self {
        Self {
            inner: Rc::new(PoolInner {
                idle: RefCell::new(Vec::new()),
                max_idle: Some(max),
                constructed: Cell::new(0),
            }),
        }
    }

    /// The most recently released idle container, or a freshly constructed
    /// one.
    pub fn acquire(&self) -> Rc<OverlayContainer> {
        let reused = self.inner.idle.borrow_mut().pop();
        if let Some(container) = reused {
            debug_assert!(!container.has_content());
            debug_assert!(container.input_blocked());
            trace!(idle = self.idle_count(), "reusing pooled container");
            return container;
        }
        self.inner.constructed.set(self.inner.constructed.get() + 1);
        trace!(
            constructed = self.inner.constructed.get(),
            "constructing container"
        );
        OverlayContainer::new()
    }

    /// Reset `container` to the idle invariant and return it to the pool.
    /// Discarded instead when the idle cap is reached.
    pub fn release(&self, container: Rc<OverlayContainer>) {
        container.reset();
        let mut idle = self.inner.idle.borrow_mut();
        if let Some(max) = self.inner.max_idle
            && idle.len() >= max
        {
            trace!(max, "idle cap reached, discarding container");
            return;
        }
        idle.push(container);
    }

    /// Number of containers constructed over the pool's lifetime.
    #[must_use]
    pub fn constructed(&self) -> usize {
        self.inner.constructed.get()
    }

    /// Number of idle containers currently pooled.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.inner.idle.borrow().len()
    }
}
