#![forbid(unsafe_code)]

//! Enter/exit transitions bracketing a popup's interactive period.
//!
//! A transition is a closed set of variants with a uniform contract: the
//! enter phase runs after layout settles and completes before input is
//! unblocked; the exit phase runs on every exit path, exactly once, before
//! the container leaves the surface. The exit phase always leaves the
//! container visually cleared (no backdrop, full opacity, zero offset).

use std::rc::Rc;

use tracing::trace;

use scrim_core::color::Rgba;
use scrim_core::error::{Error, Result};
use scrim_core::geometry::Point;

use crate::anim::{Easing, animate, lerp};
use crate::container::OverlayContainer;

/// Default scrim color behind a popup.
pub const DEFAULT_BACKDROP: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.8);

/// Direction of travel when a sliding popup enters. The exit always travels
/// the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

/// Static backdrop; the popup appears and disappears on a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoTransition {
    pub backdrop: Rgba,
}

impl Default for NoTransition {
    fn default() -> Self {
        Self {
            backdrop: DEFAULT_BACKDROP,
        }
    }
}

impl NoTransition {
    #[must_use]
    pub fn backdrop(mut self, backdrop: Rgba) -> Self {
        self.backdrop = backdrop;
        self
    }
}

/// Container opacity animates 0 to 1 on enter and back on exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTransition {
    /// Enter duration in seconds.
    pub in_duration: f32,
    /// Exit duration in seconds.
    pub out_duration: f32,
    pub backdrop: Rgba,
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self {
            in_duration: 0.1,
            out_duration: 0.1,
            backdrop: DEFAULT_BACKDROP,
        }
    }
}

impl FadeTransition {
    #[must_use]
    pub fn in_duration(mut self, seconds: f32) -> Self {
        self.in_duration = seconds;
        self
    }

    #[must_use]
    pub fn out_duration(mut self, seconds: f32) -> Self {
        self.out_duration = seconds;
        self
    }

    #[must_use]
    pub fn backdrop(mut self, backdrop: Rgba) -> Self {
        self.backdrop = backdrop;
        self
    }
}

/// Content slides in from just past a surface edge while the backdrop alpha
/// animates up; the exit reverses both concurrently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransition {
    /// Enter duration in seconds.
    pub in_duration: f32,
    /// Exit duration in seconds.
    pub out_duration: f32,
    pub backdrop: Rgba,
    pub in_curve: Easing,
    pub out_curve: Easing,
    pub direction: Direction,
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self {
            in_duration: 0.2,
            out_duration: 0.2,
            backdrop: DEFAULT_BACKDROP,
            in_curve: Easing::OutBack,
            out_curve: Easing::InBack,
            direction: Direction::Down,
        }
    }
}

impl SlideTransition {
    #[must_use]
    pub fn in_duration(mut self, seconds: f32) -> Self {
        self.in_duration = seconds;
        self
    }

    #[must_use]
    pub fn out_duration(mut self, seconds: f32) -> Self {
        self.out_duration = seconds;
        self
    }

    #[must_use]
    pub fn backdrop(mut self, backdrop: Rgba) -> Self {
        self.backdrop = backdrop;
        self
    }

    #[must_use]
    pub fn in_curve(mut self, curve: Easing) -> Self {
        self.in_curve = curve;
        self
    }

    #[must_use]
    pub fn out_curve(mut self, curve: Easing) -> Self {
        self.out_curve = curve;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// How a popup appears and disappears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    None(NoTransition),
    Fade(FadeTransition),
    Slide(SlideTransition),
}

impl Default for Transition {
    fn default() -> Self {
        Self::Fade(FadeTransition::default())
    }
}

impl Transition {
    #[must_use]
    pub fn none() -> Self {
        Self::None(NoTransition::default())
    }

    #[must_use]
    pub fn fade() -> Self {
        Self::Fade(FadeTransition::default())
    }

    #[must_use]
    pub fn slide() -> Self {
        Self::Slide(SlideTransition::default())
    }

    #[must_use]
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::None(_) => "none",
            Self::Fade(_) => "fade",
            Self::Slide(_) => "slide",
        }
    }

    fn validate(&self) -> Result<()> {
        let durations = match self {
            Self::None(_) => [0.0, 0.0],
            Self::Fade(fade) => [fade.in_duration, fade.out_duration],
            Self::Slide(slide) => [slide.in_duration, slide.out_duration],
        };
        for duration in durations {
            if !duration.is_finite() || duration < 0.0 {
                return Err(Error::Configuration(format!(
                    "transition duration must be a non-negative number of seconds, got {duration}"
                )));
            }
        }
        Ok(())
    }

    /// Enter phase. Validates the configuration, then animates the popup
    /// into place; completes before input is unblocked.
    pub(crate) async fn enter(&self, container: &Rc<OverlayContainer>) -> Result<()> {
        self.validate()?;
        trace!(transition = self.name(), "enter phase");
        match self {
            Self::None(cfg) => {
                container.set_backdrop(Some(cfg.backdrop));
            }
            Self::Fade(cfg) => {
                container.set_backdrop(Some(cfg.backdrop));
                container.set_opacity(0.0);
                animate(cfg.in_duration, Easing::Linear, |p| {
                    container.set_opacity(p);
                })
                .await;
            }
            Self::Slide(cfg) => {
                let content = container.content().ok_or(Error::InvalidState(
                    "slide transition requires an attached content",
                ))?;
                let offset = slide_offset(container, cfg.direction);
                content.set_offset(offset);
                container.set_backdrop(Some(cfg.backdrop.with_alpha(0.0)));
                let target_alpha = cfg.backdrop.a;
                tokio::join!(
                    animate(cfg.in_duration, cfg.in_curve, |p| {
                        content.set_offset(Point::new(
                            lerp(offset.x, 0.0, p),
                            lerp(offset.y, 0.0, p),
                        ));
                    }),
                    animate(cfg.in_duration, Easing::Linear, |p| {
                        container.set_backdrop(Some(
                            cfg.backdrop.with_alpha(lerp(0.0, target_alpha, p)),
                        ));
                    }),
                );
            }
        }
        Ok(())
    }

    /// Exit phase. Runs on every exit path before the container leaves the
    /// surface, and leaves the container visually cleared.
    pub(crate) async fn exit(&self, container: &Rc<OverlayContainer>) {
        trace!(transition = self.name(), "exit phase");
        match self {
            Self::None(_) => {}
            Self::Fade(cfg) => {
                animate(cfg.out_duration, Easing::Linear, |p| {
                    container.set_opacity(1.0 - p);
                })
                .await;
            }
            Self::Slide(cfg) => {
                if let Some(content) = container.content() {
                    let offset = slide_offset(container, cfg.direction);
                    let start_alpha = container.backdrop().map_or(cfg.backdrop.a, |c| c.a);
                    tokio::join!(
                        animate(cfg.out_duration, cfg.out_curve, |p| {
                            content.set_offset(Point::new(
                                lerp(0.0, offset.x, p),
                                lerp(0.0, offset.y, p),
                            ));
                        }),
                        animate(cfg.out_duration, Easing::Linear, |p| {
                            container.set_backdrop(Some(
                                cfg.backdrop.with_alpha(lerp(start_alpha, 0.0, p)),
                            ));
                        }),
                    );
                    content.set_offset(Point::ZERO);
                }
            }
        }
        container.set_backdrop(None);
        container.set_opacity(1.0);
    }
}

/// Off-surface offset placing the content just past the edge it enters
/// from. The direction is the direction of travel on entry (`y` grows
/// downward), so `Down` starts above the top edge.
fn slide_offset(container: &OverlayContainer, direction: Direction) -> Point {
    let bounds = container.bounds();
    let rect = container.content_rect();
    match direction {
        Direction::Down => Point::new(0.0, -rect.bottom()),
        Direction::Up => Point::new(0.0, bounds.height - rect.y),
        Direction::Left => Point::new(bounds.width - rect.x, 0.0),
        Direction::Right => Point::new(-rect.right(), 0.0),
    }
}
