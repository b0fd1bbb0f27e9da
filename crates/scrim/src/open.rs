#![forbid(unsafe_code)]

//! The open orchestrator: mounts a popup, brackets it with a transition,
//! races the auto-dismiss watchers against the caller's interactive body,
//! and tears everything down in reverse order on every exit path.
//!
//! Teardown ordering, guaranteed on normal return, dismissal, error, and
//! cooperative cancellation alike: transition exit runs first, then the
//! container leaves the surface, then the content detaches, then the
//! container returns to the pool.

use std::future::Future;
use std::pin::pin;
use std::rc::Rc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use scrim_core::error::{Error, Result};
use scrim_core::event::KeyEvent;

use crate::container::OverlayContainer;
use crate::content::Content;
use crate::dismiss::{AutoDismiss, DismissCause, DismissKeys};
use crate::pool::ContainerPool;
use crate::surface::RootSurface;
use crate::transition::Transition;
use crate::unwind::Unwinder;

/// Options for [`open`].
#[derive(Debug, Clone)]
pub struct OpenOptions {
    auto_dismiss: bool,
    transition: Transition,
    keys: DismissKeys,
    cancel: CancellationToken,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            auto_dismiss: true,
            transition: Transition::default(),
            keys: DismissKeys::default(),
            cancel: CancellationToken::new(),
        }
    }
}

impl OpenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the outside-tap and key watchers. On by default.
    #[must_use]
    pub fn auto_dismiss(mut self, enabled: bool) -> Self {
        self.auto_dismiss = enabled;
        self
    }

    /// The enter/exit transition. Fade by default.
    #[must_use]
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Key codes that dismiss the popup.
    #[must_use]
    pub fn dismiss_keys(mut self, keys: DismissKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Token cancelling the whole open call from outside. Cancellation is
    /// cooperative: the full unwind, including the exit animation, still
    /// runs before [`open`] returns.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }
}

/// What an open cycle produced.
#[derive(Debug)]
pub struct Outcome<T> {
    /// The body's output, or `None` when the interactive period was
    /// cancelled by a watcher or the external token.
    pub output: Option<T>,
    /// The per-cycle auto-dismiss record.
    pub auto_dismiss: Rc<AutoDismiss>,
}

impl<T> Outcome<T> {
    /// Whether the popup closed itself rather than by caller action.
    #[must_use]
    pub fn auto_dismissed(&self) -> bool {
        self.auto_dismiss.is_fired()
    }

    #[must_use]
    pub fn cause(&self) -> Option<DismissCause> {
        self.auto_dismiss.cause()
    }
}

/// Open `content` as a modal popup on `surface` and run `body` as its
/// interactive period.
///
/// The lifecycle, in order: a container is acquired from `pool`, the
/// content attached, the container mounted gated and invisible, one
/// scheduling step yielded so layout settles, the transition's enter phase
/// run, the dismiss watchers armed (when `auto_dismiss` is on), the input
/// gate opened, and `body` awaited. The first watcher to fire cancels the
/// body on the next scheduling step. Whichever way the interactive period
/// ends, every setup step is then unwound in reverse, and only after the
/// unwind does the returned [`AutoDismiss`] record its cause.
///
/// # Errors
///
/// `InvalidState` when `content` is already mounted in an open popup;
/// `Configuration` when the transition parameters are unusable. Cleanup
/// registered before the failure still runs.
///
/// Dropping the returned future mid-flight skips the async part of the
/// teardown (`Drop` cannot await); use [`OpenOptions::cancel_token`] for
/// cooperative cancellation instead.
pub async fn open<T, F, Fut>(
    surface: &Rc<RootSurface>,
    pool: &ContainerPool,
    content: Rc<dyn Content>,
    options: OpenOptions,
    body: F,
) -> Result<Outcome<T>>
where
    F: FnOnce(Rc<AutoDismiss>) -> Fut,
    Fut: Future<Output = T>,
{
    if surface.is_content_mounted(&content) {
        return Err(Error::InvalidState(
            "content is already mounted in an open popup",
        ));
    }
    debug!(
        auto_dismiss = options.auto_dismiss,
        transition = options.transition.name(),
        "opening popup"
    );

    let auto_dismiss = Rc::new(AutoDismiss::new());
    let mut unwind = Unwinder::new();
    let mut pending: Option<DismissCause> = None;

    let result = async {
        // Container from the pool; released last.
        let container = pool.acquire();
        unwind.defer_fn("release container", {
            let pool = pool.clone();
            let container = Rc::clone(&container);
            move || pool.release(container)
        });

        // Content into the container.
        container.attach(Rc::clone(&content))?;
        unwind.defer_fn("detach content", {
            let container = Rc::clone(&container);
            move || container.detach()
        });

        // Container onto the surface, gated and invisible.
        container.set_input_blocked(true);
        container.set_opacity(0.0);
        surface.add_child(Rc::clone(&container));
        unwind.defer_fn("remove from surface", {
            let surface = Rc::clone(surface);
            let container = Rc::clone(&container);
            move || surface.remove_child(&container)
        });

        // Let layout settle; sizes are constant from here on.
        tokio::task::yield_now().await;
        container.sync_layout(surface.size());
        container.set_opacity(1.0);
        trace!(bounds = ?container.bounds(), "layout settled");

        // Transition enter; the exit phase is deferred and runs exactly
        // once, before the container leaves the surface.
        options.transition.enter(&container).await?;
        unwind.defer("transition exit", {
            let transition = options.transition;
            let container = Rc::clone(&container);
            move || async move { transition.exit(&container).await }
        });

        // Key subscription starts buffering here, before the gate opens.
        // The outside waiter arms on the first poll of the select below,
        // before control can return to the host event loop.
        let keys = options.auto_dismiss.then(|| surface.subscribe_keys());

        // Open the input gate; re-closed on unwind.
        container.set_input_blocked(false);
        unwind.defer_fn("close input gate", {
            let container = Rc::clone(&container);
            move || container.set_input_blocked(true)
        });

        // Interactive period vs. dismiss watchers vs. external cancel.
        let mut body_fut = pin!(body(Rc::clone(&auto_dismiss)));
        let mut watcher = pin!(wait_for_dismiss(&container, keys, options.keys));
        tokio::select! {
            output = &mut body_fut => {
                trace!("body returned");
                Ok(Some(output))
            }
            cause = &mut watcher => {
                trace!(?cause, "watcher fired, cancelling body");
                pending = Some(cause);
                Ok(None)
            }
            () = options.cancel.cancelled() => {
                trace!("open cancelled externally");
                Ok(None)
            }
        }
    }
    .await;

    unwind.unwind().await;
    if let Some(cause) = pending {
        auto_dismiss.fire(cause);
    }
    debug!(cause = ?auto_dismiss.cause(), "popup closed");
    result.map(|output| Outcome {
        output,
        auto_dismiss,
    })
}

/// Race the outside-interaction notification against the dismiss keys.
/// Resolves with the first cause; never resolves when watching is off.
async fn wait_for_dismiss(
    container: &OverlayContainer,
    keys: Option<broadcast::Receiver<KeyEvent>>,
    bindings: DismissKeys,
) -> DismissCause {
    let Some(mut keys) = keys else {
        return std::future::pending().await;
    };
    let outside = container.outside_interaction();
    tokio::select! {
        () = outside => DismissCause::OutsideTouch,
        cause = wait_for_key(&mut keys, bindings) => cause,
    }
}

async fn wait_for_key(
    keys: &mut broadcast::Receiver<KeyEvent>,
    bindings: DismissKeys,
) -> DismissCause {
    loop {
        match keys.recv().await {
            Ok(event) => {
                if let Some(cause) = bindings.classify(event) {
                    return cause;
                }
            }
            // A lagged subscriber just resumes; a closed stream means the
            // surface is gone, so there is nothing left to watch.
            Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => {
                std::future::pending::<()>().await;
            }
        }
    }
}
