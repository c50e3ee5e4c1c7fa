//! Intro animation: hands sweep out of the 12 o'clock rest pose.
//!
//! When the face first gains focus, every hand and the donut are interpolated
//! from the rest pose (angle 0, donut at the top of the frame) toward their
//! true positions. The controller is a small state machine:
//!
//! ```text
//! Pending --focus--> Running --progress == COMPLETE--> Finished
//!    |                  |
//!    +----unload--------+-----> Detached
//! ```
//!
//! Only the first focus gain starts the run; later focus events are ignored.
//! Progress is a fixed-point value in `0..=ANIMATION_NORMALIZED_MAX` and never
//! decreases during a run.

use crate::angle::Angle;
use crate::config::{DONUT_INTRO_DURATION_MS, SPRINKLES_INTRO_DURATION_MS};

/// Fixed-point value of a completed animation.
pub const ANIMATION_NORMALIZED_MAX: u16 = u16::MAX;

// =============================================================================
// Progress and Interpolation
// =============================================================================

/// Normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationProgress(u16);

impl AnimationProgress {
    pub const START: Self = Self(0);
    pub const COMPLETE: Self = Self(ANIMATION_NORMALIZED_MAX);

    #[inline]
    pub const fn new(raw: u16) -> Self { Self(raw) }

    #[inline]
    pub const fn raw(self) -> u16 { self.0 }

    #[inline]
    pub const fn is_complete(self) -> bool { self.0 == ANIMATION_NORMALIZED_MAX }
}

/// `from + progress * (to - from) / MAX`.
#[inline]
pub const fn interpolate_linear(
    from: i64,
    to: i64,
    progress: AnimationProgress,
) -> i64 {
    from + progress.0 as i64 * (to - from) / ANIMATION_NORMALIZED_MAX as i64
}

/// Ease a hand from the 12 o'clock rest pose toward `target`.
///
/// The sweep always runs clockwise from 0 through the raw target value.
#[inline]
pub const fn interpolate_angle(
    target: Angle,
    progress: AnimationProgress,
) -> Angle {
    Angle::new(interpolate_linear(0, target.raw() as i64, progress) as i32)
}

// =============================================================================
// Curves
// =============================================================================

/// Timing curve applied to linear elapsed time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl AnimationCurve {
    /// Map linear progress through the curve. End points are exact.
    pub const fn apply(
        self,
        linear: AnimationProgress,
    ) -> AnimationProgress {
        const MAX: u64 = ANIMATION_NORMALIZED_MAX as u64;
        let p = linear.0 as u64;
        let eased = match self {
            Self::Linear => p,
            Self::EaseIn => p * p / MAX,
            Self::EaseOut => MAX - (MAX - p) * (MAX - p) / MAX,
            Self::EaseInOut => {
                if p < MAX / 2 {
                    2 * p * p / MAX
                } else {
                    MAX - 2 * (MAX - p) * (MAX - p) / MAX
                }
            }
        };
        AnimationProgress(eased as u16)
    }
}

// =============================================================================
// Intro Controller
// =============================================================================

/// Lifecycle of the intro animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntroState {
    /// Waiting for the first focus gain. Renders the rest pose.
    Pending,
    Running { started_at_ms: u64 },
    Finished,
    /// View torn down; no further redraw requests.
    Detached,
}

/// One-shot intro animation driven by host timestamps.
#[derive(Clone, Copy, Debug)]
pub struct IntroAnimation {
    state: IntroState,
    duration_ms: u32,
    curve: AnimationCurve,
    progress: AnimationProgress,
}

impl IntroAnimation {
    pub const fn new(
        duration_ms: u32,
        curve: AnimationCurve,
    ) -> Self {
        Self {
            state: IntroState::Pending,
            duration_ms,
            curve,
            progress: AnimationProgress::START,
        }
    }

    /// Ease-out sweep used with stroke hands.
    pub const fn donut() -> Self { Self::new(DONUT_INTRO_DURATION_MS, AnimationCurve::EaseOut) }

    /// Ease-in sweep used with polygon hands.
    pub const fn sprinkles() -> Self { Self::new(SPRINKLES_INTRO_DURATION_MS, AnimationCurve::EaseIn) }

    #[inline]
    pub const fn state(&self) -> IntroState { self.state }

    #[inline]
    pub const fn progress(&self) -> AnimationProgress { self.progress }

    #[inline]
    pub const fn is_running(&self) -> bool { matches!(self.state, IntroState::Running { .. }) }

    pub const fn duration_ms(&self) -> u32 { self.duration_ms }

    /// Handle a focus change. Returns `true` if this call started the run.
    pub fn on_focus(
        &mut self,
        did_focus: bool,
        at_ms: u64,
    ) -> bool {
        if !did_focus || self.state != IntroState::Pending {
            return false;
        }
        self.state = IntroState::Running { started_at_ms: at_ms };
        self.progress = AnimationProgress::START;
        true
    }

    /// Advance the run to `at_ms`.
    ///
    /// Returns the new progress while running (the caller redraws), `None`
    /// otherwise. Reaching [`AnimationProgress::COMPLETE`] finishes the run.
    pub fn update(
        &mut self,
        at_ms: u64,
    ) -> Option<AnimationProgress> {
        let IntroState::Running { started_at_ms } = self.state else {
            return None;
        };

        let elapsed = at_ms.saturating_sub(started_at_ms);
        let duration = u64::from(self.duration_ms);
        let linear = if duration == 0 || elapsed >= duration {
            AnimationProgress::COMPLETE
        } else {
            AnimationProgress((elapsed * u64::from(ANIMATION_NORMALIZED_MAX) / duration) as u16)
        };

        self.progress = self.curve.apply(linear).max(self.progress);
        if self.progress.is_complete() {
            self.state = IntroState::Finished;
        }
        Some(self.progress)
    }

    /// Stop the run for good. A finished intro stays finished.
    pub fn detach(&mut self) {
        if self.state != IntroState::Finished {
            self.state = IntroState::Detached;
        }
    }
}

impl Default for IntroAnimation {
    fn default() -> Self { Self::donut() }
}

// =============================================================================
// Unit Tests
// =============================================================================
