// Model exports
pub mod domain;
pub mod events;

pub use domain::{
    AgeRange, DailyQuotaState, Dealbreakers, DecisionLog, DrinkingStance, EducationLevel,
    ExclusionSets, FilterCriteria, KidsStance, Location, MatchReason, MatchResult, MorningStyle,
    OptionalAttributes, Personality, PetsStance, PlanningStyle, Profile, RankedCandidate,
    RomanticStyle, SmokingStance, SocialStyle, UserPreferences,
};
pub use events::{DecisionEvent, DecisionKind, FeedEvent, MatchEvent};
