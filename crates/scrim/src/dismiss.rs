#![forbid(unsafe_code)]

//! Auto-dismiss causes, key bindings, and the single-fire event.

use std::cell::Cell;

use tracing::debug;

use scrim_core::event::KeyEvent;

/// Why a popup dismissed itself. A caller-driven close records no cause;
/// it is observable as the unfired state of [`AutoDismiss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissCause {
    /// A pointer went down on the scrim outside the popup content.
    OutsideTouch,
    /// The escape key was pressed.
    EscapeKey,
    /// The platform back button was pressed.
    BackButton,
}

/// Raw key codes that trigger an auto-dismiss.
///
/// Key codes are platform-dependent; the defaults are the raw codes of the
/// platform the engine grew up on (escape `27`, back button `1073742106`).
/// Replace them to match the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissKeys {
    pub escape: u32,
    pub back: u32,
}

impl Default for DismissKeys {
    fn default() -> Self {
        Self {
            escape: 27,
            back: 1_073_742_106,
        }
    }
}

impl DismissKeys {
    /// Classify a key event; `None` for keys that do not dismiss.
    #[must_use]
    pub fn classify(&self, event: KeyEvent) -> Option<DismissCause> {
        if event.code == self.escape {
            Some(DismissCause::EscapeKey)
        } else if event.code == self.back {
            Some(DismissCause::BackButton)
        } else {
            None
        }
    }
}

/// Single-fire record of an automatic dismissal.
///
/// One instance exists per open cycle. The first cause wins; later firing
/// attempts are no-ops. The orchestrator fires it only after the unwind
/// completes, so a caller body never observes a fired event mid-cycle.
#[derive(Debug, Default)]
pub struct AutoDismiss {
    fired: Cell<Option<DismissCause>>,
}

impl AutoDismiss {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `cause` unless a cause is already recorded.
    pub(crate) fn fire(&self, cause: DismissCause) {
        if self.fired.get().is_none() {
            debug!(?cause, "popup auto-dismissed");
            self.fired.set(Some(cause));
        }
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired.get().is_some()
    }

    /// The recorded cause, or `None` when the popup closed by caller
    /// action.
    #[must_use]
    pub fn cause(&self) -> Option<DismissCause> {
        self.fired.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_classify_both_keys() {
        let keys = DismissKeys::default();
        assert_eq!(
            keys.classify(KeyEvent::new(27)),
            Some(DismissCause::EscapeKey)
        );
        assert_eq!(
            keys.classify(KeyEvent::new(1_073_742_106)),
            Some(DismissCause::BackButton)
        );
        assert_eq!(keys.classify(KeyEvent::new(13)), None);
    }

    #[test]
    fn custom_bindings_replace_the_defaults() {
        let keys = DismissKeys { escape: 1, back: 2 };
        assert_eq!(keys.classify(KeyEvent::new(27)), None);
        assert_eq!(
            keys.classify(KeyEvent::new(1)),
            Some(DismissCause::EscapeKey)
        );
        assert_eq!(
            keys.classify(KeyEvent::new(2)),
            Some(DismissCause::BackButton)
        );
    }

    #[test]
    fn first_cause_wins() {
        let event = AutoDismiss::new();
        assert!(!event.is_fired());

        event.fire(DismissCause::EscapeKey);
        event.fire(DismissCause::OutsideTouch);

        assert!(event.is_fired());
        assert_eq!(event.cause(), Some(DismissCause::EscapeKey));
    }
}
