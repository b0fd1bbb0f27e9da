#![forbid(unsafe_code)]

//! Reverse-order cleanup stack for the open lifecycle.
//!
//! Steps deferred during setup run in strict reverse order on every exit
//! path (normal return, dismissal, error, cancellation), and each step runs
//! exactly once. Async steps run to completion before the next one starts,
//! which is what lets an exit animation finish before its container is torn
//! down.

use std::future::Future;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tracing::trace;

type Step = Box<dyn FnOnce() -> LocalBoxFuture<'static, ()>>;

/// Ordered stack of labeled cleanup steps, executed in reverse.
pub(crate) struct Unwinder {
    steps: Vec<(&'static str, Step)>,
}

impl Unwinder {
    pub(crate) fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Defer an async cleanup step.
    pub(crate) fn defer<F, Fut>(&mut self, label: &'static str, step: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.steps.push((label, Box::new(move || step().boxed_local())));
    }

    /// Defer a synchronous cleanup step.
    pub(crate) fn defer_fn(&mut self, label: &'static str, step: impl FnOnce() + 'static) {
        self.defer(label, move || async move { step() });
    }

    /// Run every deferred step, most recent first.
    pub(crate) async fn unwind(mut self) {
        while let Some((label, step)) = self.steps.pop() {
            trace!(step = label, "unwinding");
            step().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[tokio::test(flavor = "current_thread")]
    async fn steps_run_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut unwinder = Unwinder::new();

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            unwinder.defer_fn(name, move || log.borrow_mut().push(name));
        }
        unwinder.unwind().await;

        assert_eq!(*log.borrow(), vec!["third", "second", "first"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn async_steps_complete_before_the_next_starts() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut unwinder = Unwinder::new();

        {
            let log = Rc::clone(&log);
            unwinder.defer_fn("sync", move || log.borrow_mut().push("sync"));
        }
        {
            let log = Rc::clone(&log);
            unwinder.defer("async", move || async move {
                tokio::task::yield_now().await;
                log.borrow_mut().push("async-done");
            });
        }
        unwinder.unwind().await;

        assert_eq!(*log.borrow(), vec!["async-done", "sync"]);
    }
}
