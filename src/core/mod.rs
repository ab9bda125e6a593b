// Core algorithm and state-machine exports
pub mod carousel;
pub mod distance;
pub mod evaluator;
pub mod filters;
pub mod gesture;
pub mod matcher;
pub mod quota;
pub mod scoring;
pub mod session;

pub use carousel::PhotoCarousel;
pub use distance::{distance_km, haversine_km};
pub use evaluator::{AcceptOutcome, DemoLikeLookup, LikeIndex, LikeLookup, MatchEvaluator};
pub use filters::{passes_filters, resolve_criteria, EffectiveCriteria};
pub use gesture::{
    CardFrame, GestureOutcome, GestureThresholds, SwipeDirection, SwipeGestureController,
    SwipePhase, TimerRequest, TimerSignal, TimerToken,
};
pub use matcher::{FilterPipeline, PipelineError, RankedDeck};
pub use quota::{DailyQuotaTracker, QuotaDecision, DEFAULT_DAILY_LIMIT};
pub use scoring::{score, score_with_breakdown, ScoreBreakdown, ScoringWeights};
pub use session::{FeedSession, SessionOptions};
