#![forbid(unsafe_code)]

//! Easing curves and the cooperative animation driver.
//!
//! All timing flows through `tokio::time`, so animations advance
//! deterministically under a paused test clock.

use std::time::Duration;

use tokio::time::Instant;

/// Overshoot constant shared by the back curves.
const BACK_OVERSHOOT: f32 = 1.70158;

/// Frame interval of the animation driver.
pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// Progress-mapping curve for a transition phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Decelerating arrival with a slight overshoot past the target.
    OutBack,
    /// Accelerating departure with a slight pull-back first.
    InBack,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    ///
    /// The back curves leave `[0, 1]` mid-flight; that is the overshoot.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + (BACK_OVERSHOOT + 1.0) * u * u * u + BACK_OVERSHOOT * u * u
            }
            Self::InBack => (BACK_OVERSHOOT + 1.0) * t * t * t - BACK_OVERSHOOT * t * t,
        }
    }
}

/// Linear interpolation.
#[must_use]
pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Drive `apply` from progress 0 to exactly 1 over `duration` seconds,
/// suspending once per frame.
///
/// A zero duration applies the end state without suspending, on the same
/// scheduling step. The final call is always `apply(1.0)`, bypassing the
/// curve, so the end state is exact regardless of rounding.
pub(crate) async fn animate(duration: f32, easing: Easing, mut apply: impl FnMut(f32)) {
    if duration <= 0.0 {
        apply(1.0);
        return;
    }
    let total = Duration::from_secs_f32(duration);
    let start = Instant::now();
    loop {
        let elapsed = start.elapsed();
        if elapsed >= total {
            break;
        }
        apply(easing.apply(elapsed.as_secs_f32() / duration));
        tokio::time::sleep(FRAME).await;
    }
    apply(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn out_back_overshoots_mid_flight() {
        assert!(Easing::OutBack.apply(0.7) > 1.0);
    }

    #[test]
    fn in_back_dips_below_zero_mid_flight() {
        assert!(Easing::InBack.apply(0.3) < 0.0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn zero_duration_applies_end_state_without_suspending() {
        let calls = Cell::new(0u32);
        let before = Instant::now();
        animate(0.0, Easing::Linear, |p| {
            assert_eq!(p, 1.0);
            calls.set(calls.get() + 1);
        })
        .await;
        assert_eq!(calls.get(), 1);
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn animation_lands_exactly_on_one() {
        let trace = RefCell::new(Vec::new());
        animate(0.1, Easing::OutBack, |p| trace.borrow_mut().push(p)).await;
        let trace = trace.borrow();
        assert!(trace.len() > 2, "expected several frames, got {trace:?}");
        assert_eq!(*trace.last().unwrap(), 1.0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn animation_takes_roughly_its_duration() {
        let start = Instant::now();
        animate(0.1, Easing::Linear, |_| {}).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed <= Duration::from_millis(100) + FRAME);
    }

    proptest! {
        #[test]
        fn easing_endpoints_are_near_exact(
            easing in prop_oneof![
                Just(Easing::Linear),
                Just(Easing::OutBack),
                Just(Easing::InBack),
            ]
        ) {
            prop_assert!(easing.apply(0.0).abs() < 1e-4);
            prop_assert!((easing.apply(1.0) - 1.0).abs() < 1e-4);
        }

        #[test]
        fn lerp_hits_both_ends(from in -100.0f32..100.0, to in -100.0f32..100.0) {
            prop_assert_eq!(lerp(from, to, 0.0), from);
            prop_assert!((lerp(from, to, 1.0) - to).abs() < 1e-3);
        }
    }
}
