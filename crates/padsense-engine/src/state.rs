//! Interaction states, overlays and the resolve timer.
//!
//! ```text
//!          dismiss            pointer down           timer            dismiss
//!   Idle ──────────▶ Tracking ────────────▶ Committed ─────▶ Resolved ─────────▶ Idle
//!    ▲                  (live decal only)                                        │
//!    └───────────────────────────────── reset (any state) ◀──────────────────────┘
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Where the session is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// Intro overlay shown, pointer ignored
    #[default]
    Idle,
    /// Pad follows the pointer
    Tracking,
    /// Pad placed, waiting to show the outcome
    Committed,
    /// Outcome overlay shown
    Resolved,
}

impl InteractionState {
    /// Lowercase name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Tracking => "tracking",
            Self::Committed => "committed",
            Self::Resolved => "resolved",
        }
    }
}

/// Overlay on top of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum Overlay {
    /// Instructions before a session
    Intro,
    /// Result of the last placement
    Outcome {
        /// Whether the pad landed in a zone
        success: bool,
    },
}

impl Overlay {
    /// Text shown to the trainee.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Intro => "Place the pad on the correct spot of the body.",
            Self::Outcome { success: true } => "Correct! The pad is placed properly.",
            Self::Outcome { success: false } => "Wrong place. Try again.",
        }
    }
}

/// One-shot, cancellable deadline.
///
/// Time is passed in by the caller; the timer never reads the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveTimer {
    deadline: Option<Instant>,
}

impl ResolveTimer {
    /// Create an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Fire if the deadline has passed. Returns true exactly once per arm.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// True while armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let start = Instant::now();
        let mut timer = ResolveTimer::new();
        timer.schedule(start, Duration::from_secs(2));

        assert!(timer.is_pending());
        assert!(!timer.poll(start + Duration::from_millis(1999)));
        assert!(timer.poll(start + Duration::from_secs(2)));
        assert!(!timer.poll(start + Duration::from_secs(3)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_timer_cancel() {
        let start = Instant::now();
        let mut timer = ResolveTimer::new();
        timer.schedule(start, Duration::from_secs(2));
        timer.cancel();
        assert!(!timer.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_delay_fires_immediately() {
        let start = Instant::now();
        let mut timer = ResolveTimer::new();
        timer.schedule(start, Duration::ZERO);
        assert!(timer.poll(start));
    }

    #[test]
    fn test_overlay_messages() {
        assert_ne!(
            Overlay::Outcome { success: true }.message(),
            Overlay::Outcome { success: false }.message()
        );
        assert_eq!(InteractionState::default(), InteractionState::Idle);
        assert_eq!(InteractionState::Committed.as_str(), "committed");
    }
}
