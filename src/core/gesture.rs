use serde::{Deserialize, Serialize};

/// Gesture tuning; defaults match the reference card UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Horizontal offset beyond which a release commits
    pub commit_distance_px: f64,
    /// Fling velocity beyond which a release commits
    pub commit_velocity_px_s: f64,
    /// Total displacement below which a release is a tap, not a swipe
    pub tap_slop_px: f64,
    /// Horizontal offset of the exit animation's terminal frame
    pub exit_offset_px: f64,
    /// Rotation of the exit animation's terminal frame, degrees
    pub exit_rotation_deg: f64,
    /// Rotation feedback per pixel of drag offset, degrees
    pub rotation_per_px: f64,
    /// Exit animation duration before the card settles
    pub exit_duration_ms: u64,
    /// Total time from commit until the next candidate is shown
    pub advance_delay_ms: u64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            commit_distance_px: 100.0,
            commit_velocity_px_s: 500.0,
            tap_slop_px: 25.0,
            exit_offset_px: 1000.0,
            exit_rotation_deg: 30.0,
            rotation_per_px: 0.1,
            exit_duration_ms: 300,
            advance_delay_ms: 350,
        }
    }
}

/// Which way a committed swipe went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Accept,
    Reject,
}

impl SwipeDirection {
    fn sign(self) -> f64 {
        match self {
            SwipeDirection::Accept => 1.0,
            SwipeDirection::Reject => -1.0,
        }
    }
}

/// Public view of the state machine's phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Committing,
    Settling,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Dragging {
        start_x: f64,
        offset: f64,
        travelled: f64,
        last_x: f64,
        last_at_ms: u64,
        velocity: f64,
    },
    Committing {
        direction: SwipeDirection,
    },
    Settling {
        direction: SwipeDirection,
    },
}

/// Per-frame visual feedback for the card renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub offset_px: f64,
    pub rotation_deg: f64,
    pub opacity: f64,
}

impl CardFrame {
    const RESTING: CardFrame = CardFrame {
        offset_px: 0.0,
        rotation_deg: 0.0,
        opacity: 1.0,
    };
}

/// Which scheduled transition a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    FinishExit,
    Advance,
}

/// Opaque handle for a scheduled transition
///
/// Tokens carry the generation the gesture had when they were issued; a
/// cancelled or completed gesture bumps the generation, so stale timers are
/// ignored when delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    generation: u64,
    kind: TimerKind,
}

/// A transition the caller must schedule on its event loop
#[derive(Debug, Clone, Copy)]
pub struct TimerRequest {
    pub token: TimerToken,
    pub delay_ms: u64,
}

/// What a pointer release decided
#[derive(Debug, Clone)]
pub enum GestureOutcome {
    /// The drag crossed a commit threshold; the decision fires now and the
    /// exit animation runs on the requested timers
    Commit {
        direction: SwipeDirection,
        timers: [TimerRequest; 2],
    },
    /// Below threshold: discard the offset, no decision fires
    SnapBack,
    /// Displacement stayed under the tap slop: treat as a click
    Tap,
}

/// A delivered timer's effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// Exit animation finished; the terminal frame is held to avoid a flash
    /// of the next card
    Settled,
    /// Time to advance to the next candidate
    Advance(SwipeDirection),
}

/// Interprets a stream of pointer samples as accept/reject decisions
///
/// `Idle -> Dragging -> Committing(dir) -> Settling -> Idle`, or
/// `Dragging -> Idle` when the release stays under both commit thresholds.
/// All time comes from sample timestamps and caller-scheduled timers; the
/// controller never reads a clock.
#[derive(Debug)]
pub struct SwipeGestureController {
    thresholds: GestureThresholds,
    phase: Phase,
    generation: u64,
}

impl SwipeGestureController {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> SwipePhase {
        match self.phase {
            Phase::Idle => SwipePhase::Idle,
            Phase::Dragging { .. } => SwipePhase::Dragging,
            Phase::Committing { .. } => SwipePhase::Committing,
            Phase::Settling { .. } => SwipePhase::Settling,
        }
    }

    /// Begin tracking a gesture
    ///
    /// Ignored while a committed card is still animating out.
    pub fn gesture_start(&mut self, x: f64, at_ms: u64) {
        match self.phase {
            Phase::Committing { .. } | Phase::Settling { .. } => {}
            _ => {
                self.phase = Phase::Dragging {
                    start_x: x,
                    offset: 0.0,
                    travelled: 0.0,
                    last_x: x,
                    last_at_ms: at_ms,
                    velocity: 0.0,
                };
            }
        }
    }

    /// Feed one pointer sample; returns the frame to render
    ///
    /// Rotation is a pure function of offset and is recomputed on every
    /// sample, not just at commit time.
    pub fn gesture_move(&mut self, x: f64, at_ms: u64) -> CardFrame {
        if let Phase::Dragging {
            start_x,
            offset,
            travelled,
            last_x,
            last_at_ms,
            velocity,
        } = &mut self.phase
        {
            let dx = x - *last_x;
            *travelled += dx.abs();
            *offset = x - *start_x;
            let dt_ms = at_ms.saturating_sub(*last_at_ms);
            if dt_ms > 0 {
                *velocity = dx / (dt_ms as f64 / 1000.0);
            }
            *last_x = x;
            *last_at_ms = at_ms;
        }
        self.frame()
    }

    /// The pointer was released; evaluate the commit condition
    pub fn gesture_end(&mut self) -> GestureOutcome {
        let Phase::Dragging {
            offset,
            travelled,
            velocity,
            ..
        } = self.phase
        else {
            return GestureOutcome::SnapBack;
        };

        if travelled < self.thresholds.tap_slop_px {
            self.phase = Phase::Idle;
            return GestureOutcome::Tap;
        }

        let commits = offset.abs() > self.thresholds.commit_distance_px
            || velocity.abs() > self.thresholds.commit_velocity_px_s;
        if !commits {
            self.phase = Phase::Idle;
            return GestureOutcome::SnapBack;
        }

        // Offset and velocity signs are evaluated independently: whichever
        // is positive wins, even when they disagree. Reference behavior.
        let direction = if offset > 0.0 || velocity > 0.0 {
            SwipeDirection::Accept
        } else {
            SwipeDirection::Reject
        };

        self.phase = Phase::Committing { direction };
        tracing::debug!(
            "Swipe committed {:?} (offset {:.0}px, velocity {:.0}px/s)",
            direction,
            offset,
            velocity
        );

        GestureOutcome::Commit {
            direction,
            timers: [
                TimerRequest {
                    token: TimerToken {
                        generation: self.generation,
                        kind: TimerKind::FinishExit,
                    },
                    delay_ms: self.thresholds.exit_duration_ms,
                },
                TimerRequest {
                    token: TimerToken {
                        generation: self.generation,
                        kind: TimerKind::Advance,
                    },
                    delay_ms: self.thresholds.advance_delay_ms,
                },
            ],
        }
    }

    /// Deliver a previously requested timer
    ///
    /// Stale tokens (from a cancelled or already-advanced gesture) and
    /// timers arriving in an unexpected phase are ignored.
    pub fn timer_fired(&mut self, token: TimerToken) -> Option<TimerSignal> {
        if token.generation != self.generation {
            return None;
        }
        match (token.kind, self.phase) {
            (TimerKind::FinishExit, Phase::Committing { direction }) => {
                self.phase = Phase::Settling { direction };
                Some(TimerSignal::Settled)
            }
            // Tolerate a dropped FinishExit timer
            (TimerKind::Advance, Phase::Settling { direction })
            | (TimerKind::Advance, Phase::Committing { direction }) => {
                self.phase = Phase::Idle;
                self.generation += 1;
                Some(TimerSignal::Advance(direction))
            }
            _ => None,
        }
    }

    /// Abort whatever is in flight without firing a decision
    ///
    /// Called when the active profile is swapped out from under the gesture;
    /// any pending timers become stale.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.generation += 1;
    }

    /// Current visual feedback values
    pub fn frame(&self) -> CardFrame {
        match self.phase {
            Phase::Idle => CardFrame::RESTING,
            Phase::Dragging { offset, .. } => CardFrame {
                offset_px: offset,
                rotation_deg: offset * self.thresholds.rotation_per_px,
                opacity: 1.0,
            },
            Phase::Committing { direction } | Phase::Settling { direction } => CardFrame {
                offset_px: direction.sign() * self.thresholds.exit_offset_px,
                rotation_deg: direction.sign() * self.thresholds.exit_rotation_deg,
                opacity: 0.0,
            },
        }
    }
}

impl Default for SwipeGestureController {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}
