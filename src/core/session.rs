use crate::core::carousel::PhotoCarousel;
use crate::core::evaluator::MatchEvaluator;
use crate::core::gesture::{
    CardFrame, GestureOutcome, GestureThresholds, SwipeDirection, SwipeGestureController,
    TimerRequest, TimerSignal, TimerToken,
};
use crate::core::matcher::{FilterPipeline, PipelineError};
use crate::core::quota::{DailyQuotaTracker, QuotaDecision, DEFAULT_DAILY_LIMIT};
use crate::core::scoring::ScoringWeights;
use crate::models::{
    DailyQuotaState, DecisionEvent, DecisionKind, DecisionLog, ExclusionSets, FeedEvent,
    FilterCriteria, MatchEvent, Profile, RankedCandidate, UserPreferences,
};
use std::collections::HashSet;

/// Everything a session restores from the persistence layer plus tuning
#[derive(Default)]
pub struct SessionOptions {
    pub weights: ScoringWeights,
    pub thresholds: GestureThresholds,
    pub daily_limit: Option<u32>,
    pub quota: Option<DailyQuotaState>,
    pub decisions: DecisionLog,
    pub blocked: HashSet<String>,
    pub reported: HashSet<String>,
    pub unlimited: bool,
}

/// The orchestrating feed: composes the pipeline, gesture controller, photo
/// carousel, quota tracker and match evaluator for one viewer
///
/// Fully synchronous; pointer samples and timer callbacks arrive on the UI
/// thread's event loop and each is processed to completion. Timers the
/// gesture controller requests are scheduled by the caller and delivered
/// back through [`FeedSession::timer_fired`].
pub struct FeedSession {
    viewer: UserPreferences,
    pipeline: FilterPipeline,
    deck: Vec<RankedCandidate>,
    cursor: usize,
    gesture: SwipeGestureController,
    carousel: PhotoCarousel,
    quota: DailyQuotaTracker,
    decisions: DecisionLog,
    blocked: HashSet<String>,
    reported: HashSet<String>,
    evaluator: MatchEvaluator,
    unlimited: bool,
    events: Vec<FeedEvent>,
}

impl FeedSession {
    pub fn new(
        viewer: UserPreferences,
        evaluator: MatchEvaluator,
        options: SessionOptions,
    ) -> Self {
        let limit = options.daily_limit.unwrap_or(DEFAULT_DAILY_LIMIT);
        let quota = match options.quota {
            Some(state) => DailyQuotaTracker::from_state(state, limit),
            None => DailyQuotaTracker::new(limit),
        };

        Self {
            viewer,
            pipeline: FilterPipeline::new(options.weights),
            deck: Vec::new(),
            cursor: 0,
            gesture: SwipeGestureController::new(options.thresholds),
            carousel: PhotoCarousel::default(),
            quota,
            decisions: options.decisions,
            blocked: options.blocked,
            reported: options.reported,
            evaluator,
            unlimited: options.unlimited,
            events: Vec::new(),
        }
    }

    fn exclusions(&self) -> ExclusionSets {
        ExclusionSets {
            liked: self.decisions.liked().clone(),
            passed: self.decisions.passed().clone(),
            blocked: self.blocked.clone(),
            reported: self.reported.clone(),
        }
    }

    /// Filter and rank a fresh candidate list into the deck
    ///
    /// When every candidate is filtered out, retries with only the exclusion
    /// rules so the feed can keep moving. Any in-flight gesture is cancelled
    /// because the active profile changes.
    pub fn load_deck(
        &mut self,
        candidates: Vec<Profile>,
        criteria: Option<&FilterCriteria>,
    ) -> Result<usize, PipelineError> {
        let excluded = self.exclusions();

        let mut ranked =
            self.pipeline
                .filter_and_rank(candidates.clone(), &self.viewer, criteria, &excluded)?;
        if ranked.candidates.is_empty() {
            tracing::info!(
                "Filters removed all {} candidates, relaxing to exclusion-only",
                ranked.total_considered
            );
            ranked = self
                .pipeline
                .rank_excluding_only(candidates, &self.viewer, &excluded)?;
        }

        self.deck = ranked.candidates;
        self.cursor = 0;
        self.gesture.cancel();
        self.reset_carousel();
        Ok(self.deck.len())
    }

    /// The candidate currently on top of the deck
    pub fn current(&self) -> Option<&RankedCandidate> {
        self.deck.get(self.cursor)
    }

    pub fn deck(&self) -> &[RankedCandidate] {
        &self.deck
    }

    pub fn pointer_down(&mut self, x: f64, at_ms: u64) {
        if self.current().is_some() {
            self.gesture.gesture_start(x, at_ms);
        }
    }

    pub fn pointer_move(&mut self, x: f64, at_ms: u64) -> CardFrame {
        self.gesture.gesture_move(x, at_ms)
    }

    /// Release the pointer and act on the outcome
    ///
    /// Returns the timers the caller must schedule; empty when nothing is
    /// animating (snap-back, tap, or a quota-denied accept rolled back).
    pub fn pointer_up(&mut self) -> Vec<TimerRequest> {
        let Some(candidate_id) = self.current().map(|c| c.profile.id.clone()) else {
            return Vec::new();
        };

        match self.gesture.gesture_end() {
            GestureOutcome::Tap => {
                // A tap pages through the profile's photos
                self.carousel.next();
                Vec::new()
            }
            GestureOutcome::SnapBack => Vec::new(),
            GestureOutcome::Commit { direction, timers } => {
                self.commit_decision(&candidate_id, direction, timers)
            }
        }
    }

    fn commit_decision(
        &mut self,
        candidate_id: &str,
        direction: SwipeDirection,
        timers: [TimerRequest; 2],
    ) -> Vec<TimerRequest> {
        match direction {
            SwipeDirection::Accept => {
                if self.quota.check_and_consume(self.unlimited) == QuotaDecision::Denied {
                    // Roll the gesture back: no decision is recorded and the
                    // card snaps home instead of animating out
                    tracing::info!("Daily like quota exhausted, rolling back accept");
                    self.gesture.cancel();
                    self.events.push(FeedEvent::QuotaExhausted);
                    return Vec::new();
                }

                let outcome = self
                    .evaluator
                    .evaluate_accept(&mut self.decisions, candidate_id);
                self.push_decision(DecisionKind::Accept, candidate_id);
                self.events.push(FeedEvent::Match(MatchEvent {
                    candidate_id: candidate_id.to_string(),
                    matched: outcome.matched,
                }));
            }
            SwipeDirection::Reject => {
                self.decisions.record_pass(candidate_id);
                self.push_decision(DecisionKind::Reject, candidate_id);
            }
        }
        timers.to_vec()
    }

    fn push_decision(&mut self, kind: DecisionKind, candidate_id: &str) {
        self.events.push(FeedEvent::Decision(DecisionEvent {
            kind,
            candidate_id: candidate_id.to_string(),
            at: chrono::Utc::now(),
        }));
    }

    /// Deliver a scheduled gesture timer
    ///
    /// Advances the deck when the settle window elapses. Stale timers from a
    /// cancelled gesture are absorbed by the controller's generation check.
    pub fn timer_fired(&mut self, token: TimerToken) {
        match self.gesture.timer_fired(token) {
            Some(TimerSignal::Advance(_)) => {
                self.cursor += 1;
                self.reset_carousel();
            }
            Some(TimerSignal::Settled) | None => {}
        }
    }

    /// The active profile was swapped externally (navigation, deck reload);
    /// discard any in-flight gesture without firing a decision
    pub fn cancel_gesture(&mut self) {
        self.gesture.cancel();
    }

    /// Step to the next photo of the active profile
    pub fn next_photo(&mut self) -> usize {
        self.carousel.next()
    }

    /// Step back to the previous photo
    pub fn prev_photo(&mut self) -> usize {
        self.carousel.prev()
    }

    pub fn photo_index(&self) -> usize {
        self.carousel.index()
    }

    /// Visual feedback values for the current frame
    pub fn frame(&self) -> CardFrame {
        self.gesture.frame()
    }

    /// Drain everything emitted since the last call, in order
    pub fn drain_events(&mut self) -> Vec<FeedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Quota record for persistence
    pub fn quota_state(&self) -> DailyQuotaState {
        self.quota.state()
    }

    /// Accumulated decisions for persistence
    pub fn decisions(&self) -> &DecisionLog {
        &self.decisions
    }

    fn reset_carousel(&mut self) {
        let photos = self.current().map(|c| c.profile.photos.len()).unwrap_or(1);
        self.carousel.show_profile(photos);
    }
}
