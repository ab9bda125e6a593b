use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Geographic location attached to a profile or to the viewer's preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocialStyle {
    Introvert,
    Ambivert,
    Extrovert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanningStyle {
    Planner,
    Flexible,
    Spontaneous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RomanticStyle {
    Romantic,
    Practical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MorningStyle {
    EarlyBird,
    NightOwl,
}

/// Personality traits, each key explicitly optional
///
/// Absence means "not answered"; scoring treats it as neutral rather than
/// incompatible.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Personality {
    #[serde(default)]
    pub social: Option<SocialStyle>,
    #[serde(default)]
    pub planning: Option<PlanningStyle>,
    #[serde(default)]
    pub romantic: Option<RomanticStyle>,
    #[serde(default)]
    pub morning: Option<MorningStyle>,
}

impl Personality {
    /// True when no trait is set at all
    pub fn is_empty(&self) -> bool {
        self.social.is_none()
            && self.planning.is_none()
            && self.romantic.is_none()
            && self.morning.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KidsStance {
    Want,
    DontWant,
    HaveKids,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmokingStance {
    Smoker,
    NonSmoker,
    PreferNonSmoker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PetsStance {
    HasPets,
    LovesPets,
    NoPets,
    Allergic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrinkingStance {
    Never,
    Socially,
    Regularly,
}

/// Lifestyle dealbreakers, each key explicitly optional
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dealbreakers {
    #[serde(default)]
    pub kids: Option<KidsStance>,
    #[serde(default)]
    pub smoking: Option<SmokingStance>,
    #[serde(default)]
    pub pets: Option<PetsStance>,
    #[serde(default)]
    pub drinking: Option<DrinkingStance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    HighSchool,
    Bachelors,
    Masters,
    Doctorate,
    Other,
}

/// Optional attributes shown on a profile card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionalAttributes {
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// A candidate profile presented on the swipe deck
///
/// Profiles are immutable inputs to this crate; they are supplied by the
/// catalog, never created here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub gender: Option<String>,
    /// Ordered photo references; at least one after pipeline normalization
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub bio: String,
    /// Interest tags, case-sensitive exact match
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub dealbreakers: Dealbreakers,
    #[serde(default)]
    pub attributes: OptionalAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

/// The viewer's own matching preferences
///
/// Used only as scoring/filtering input, never mutated by this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub dealbreakers: Dealbreakers,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub max_distance_km: Option<u16>,
}

/// Optional filter override layer
///
/// Any unset field falls back to the viewer's preferences (age, distance) or
/// to a permissive no-op (everything else). An unset or empty field never
/// narrows the candidate set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub max_distance_km: Option<u16>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub dealbreakers: Dealbreakers,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    /// Case-insensitive substring match against the candidate's profession
    #[serde(default)]
    pub profession: Option<String>,
}

/// Why a candidate scored the way they did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MatchReason {
    /// Shared interest tags, in the viewer's ordering
    #[serde(rename_all = "camelCase")]
    CommonInterests { highlight: String, shared: Vec<String> },
    SimilarPersonality,
}

/// Compatibility score in [0, 100] plus ordered human-readable reasons
///
/// Derived and recomputed on demand; never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub reasons: Vec<MatchReason>,
}

/// A candidate annotated with its match result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub profile: Profile,
    pub result: MatchResult,
}

/// Id sets that exclude a candidate from the deck outright
#[derive(Debug, Clone, Default)]
pub struct ExclusionSets {
    pub liked: HashSet<String>,
    pub passed: HashSet<String>,
    pub blocked: HashSet<String>,
    pub reported: HashSet<String>,
}

impl ExclusionSets {
    pub fn contains(&self, id: &str) -> bool {
        self.liked.contains(id)
            || self.passed.contains(id)
            || self.blocked.contains(id)
            || self.reported.contains(id)
    }
}

/// Accumulated accept/reject decisions
///
/// Invariant: a candidate id appears in at most one of the liked/passed
/// sets at any time; recording a like evicts the id from passed.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    liked: HashSet<String>,
    passed: HashSet<String>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the log from persisted sets, re-establishing the invariant
    /// if the stored data violates it
    pub fn from_sets(liked: HashSet<String>, passed: HashSet<String>) -> Self {
        let mut log = Self { liked, passed: HashSet::new() };
        for id in passed {
            log.record_pass(&id);
        }
        log
    }

    pub fn record_like(&mut self, id: &str) {
        self.passed.remove(id);
        self.liked.insert(id.to_string());
    }

    pub fn record_pass(&mut self, id: &str) {
        // A pass never displaces an existing like
        if !self.liked.contains(id) {
            self.passed.insert(id.to_string());
        }
    }

    pub fn has_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    pub fn has_passed(&self, id: &str) -> bool {
        self.passed.contains(id)
    }

    pub fn liked(&self) -> &HashSet<String> {
        &self.liked
    }

    pub fn passed(&self) -> &HashSet<String> {
        &self.passed
    }
}

/// Daily accept-quota record
///
/// The count is only valid for the calendar day stored; a read on any other
/// day resets the count to 0 before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuotaState {
    pub date: NaiveDate,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_log_invariant() {
        let mut log = DecisionLog::new();
        log.record_pass("a");
        assert!(log.has_passed("a"));

        log.record_like("a");
        assert!(log.has_liked("a"));
        assert!(!log.has_passed("a"));

        log.record_pass("a");
        assert!(log.has_liked("a"));
        assert!(!log.has_passed("a"));
    }

    #[test]
    fn test_from_sets_enforces_invariant() {
        let liked: HashSet<String> = HashSet::from(["a".to_string()]);
        let passed: HashSet<String> = HashSet::from(["a".to_string(), "b".to_string()]);
        let log = DecisionLog::from_sets(liked, passed);

        assert!(log.has_liked("a"));
        assert!(!log.has_passed("a"));
        assert!(log.has_passed("b"));
    }

    #[test]
    fn test_exclusion_sets_contains() {
        let mut excluded = ExclusionSets::default();
        excluded.blocked.insert("x".to_string());
        assert!(excluded.contains("x"));
        assert!(!excluded.contains("y"));
    }

    #[test]
    fn test_profile_deserializes_with_missing_optionals() {
        let json = r#"{"id":"p1","name":"Asha","age":27}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "p1");
        assert!(profile.photos.is_empty());
        assert!(profile.personality.is_empty());
        assert!(profile.location.is_none());
    }

    #[test]
    fn test_smoking_stance_tokens() {
        let v: SmokingStance = serde_json::from_str("\"prefer-non-smoker\"").unwrap();
        assert_eq!(v, SmokingStance::PreferNonSmoker);
        assert_eq!(
            serde_json::to_string(&SmokingStance::NonSmoker).unwrap(),
            "\"non-smoker\""
        );
    }

    #[test]
    fn test_age_range_contains() {
        let range = AgeRange { min: 18, max: 100 };
        assert!(range.contains(18));
        assert!(range.contains(100));
        assert!(!range.contains(17));
    }
}
