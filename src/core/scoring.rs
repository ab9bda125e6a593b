use crate::core::distance::distance_km;
use crate::models::{
    Dealbreakers, Location, MatchReason, MatchResult, Personality, Profile, SmokingStance,
    UserPreferences,
};
use serde::{Deserialize, Serialize};

/// Similarity assigned when no personality trait is comparable on either side
pub const PERSONALITY_NEUTRAL: f64 = 0.5;

/// Credit a dealbreaker key contributes when missing on either side
///
/// Deliberately 0.0 (diluting the average) while missing personality traits
/// are neutral; the asymmetry matches the reference behavior. Unify here if
/// that policy ever changes.
pub const DEALBREAKER_MISSING_CREDIT: f64 = 0.0;

/// Credit for the symmetric non-smoker / prefer-non-smoker pairing
pub const SMOKING_PARTIAL_CREDIT: f64 = 0.5;

/// Personality similarity above this emits a "similar personality" reason
pub const SIMILAR_PERSONALITY_THRESHOLD: f64 = 0.6;

/// Fixed reference radius for the distance sub-score, independent of any
/// user-configured distance preference
pub const DISTANCE_REFERENCE_KM: f64 = 100.0;

/// Number of dealbreaker keys the agreement average is taken over
const DEALBREAKER_KEY_COUNT: f64 = 3.0;

/// Scoring weights; must sum to 100
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub interests: f64,
    pub personality: f64,
    pub distance: f64,
    pub dealbreakers: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 40.0,
            personality: 30.0,
            distance: 20.0,
            dealbreakers: 10.0,
        }
    }
}

/// Unweighted sub-scores (each in [0, 1]) and the pre-round weighted total
#[derive(Debug, Clone, Copy)]
pub struct ScoreBreakdown {
    pub interests: f64,
    pub personality: f64,
    pub distance: f64,
    pub dealbreakers: f64,
    pub weighted_total: f64,
}

/// Calculate a compatibility score (0-100) for a candidate
///
/// Weighted sum of four independent sub-scores:
/// - interest overlap (40): shared tags over the larger interest list
/// - personality similarity (30): matched traits over comparable traits,
///   neutral 0.5 when nothing is comparable
/// - distance (20): linear falloff over a fixed 100 km reference radius,
///   0 when either location is missing
/// - dealbreaker agreement (10): exact match over {smoking, drinking, kids},
///   averaged over all three keys regardless of comparability
///
/// Absent optional data degrades the score gracefully; nothing here fails.
pub fn score(
    weights: &ScoringWeights,
    viewer: &UserPreferences,
    candidate: &Profile,
) -> MatchResult {
    score_with_breakdown(weights, viewer, candidate).0
}

/// Same as [`score`] but also exposes the sub-scores for diagnostics
pub fn score_with_breakdown(
    weights: &ScoringWeights,
    viewer: &UserPreferences,
    candidate: &Profile,
) -> (MatchResult, ScoreBreakdown) {
    let mut reasons = Vec::new();

    let (interest_score, shared) = interest_overlap(&viewer.interests, &candidate.interests);
    if let Some(first) = shared.first() {
        reasons.push(MatchReason::CommonInterests {
            highlight: first.clone(),
            shared: shared.clone(),
        });
    }

    let personality_score = personality_similarity(&viewer.personality, &candidate.personality);
    if personality_score > SIMILAR_PERSONALITY_THRESHOLD {
        reasons.push(MatchReason::SimilarPersonality);
    }

    let distance_score = distance_subscore(viewer.location.as_ref(), candidate.location.as_ref());

    let dealbreaker_score = dealbreaker_agreement(&viewer.dealbreakers, &candidate.dealbreakers);

    let weighted_total = interest_score * weights.interests
        + personality_score * weights.personality
        + distance_score * weights.distance
        + dealbreaker_score * weights.dealbreakers;

    let score = weighted_total.round().clamp(0.0, 100.0) as u8;

    (
        MatchResult { score, reasons },
        ScoreBreakdown {
            interests: interest_score,
            personality: personality_score,
            distance: distance_score,
            dealbreakers: dealbreaker_score,
            weighted_total,
        },
    )
}

/// Interest overlap in [0, 1] plus the shared tags in the viewer's ordering
#[inline]
fn interest_overlap(viewer: &[String], candidate: &[String]) -> (f64, Vec<String>) {
    let shared: Vec<String> = viewer
        .iter()
        .filter(|tag| candidate.contains(tag))
        .cloned()
        .collect();

    let denom = viewer.len().max(candidate.len()).max(1) as f64;
    (shared.len() as f64 / denom, shared)
}

/// Fraction of comparable personality traits that match exactly
///
/// A trait counts as comparable only when both sides answered it; with no
/// comparable traits at all the similarity is neutral, not zero.
#[inline]
fn personality_similarity(viewer: &Personality, candidate: &Personality) -> f64 {
    let mut compared = 0u32;
    let mut matched = 0u32;

    compare_trait(viewer.social, candidate.social, &mut compared, &mut matched);
    compare_trait(viewer.planning, candidate.planning, &mut compared, &mut matched);
    compare_trait(viewer.romantic, candidate.romantic, &mut compared, &mut matched);
    compare_trait(viewer.morning, candidate.morning, &mut compared, &mut matched);

    if compared == 0 {
        PERSONALITY_NEUTRAL
    } else {
        matched as f64 / compared as f64
    }
}

#[inline]
fn compare_trait<T: PartialEq>(
    viewer: Option<T>,
    candidate: Option<T>,
    compared: &mut u32,
    matched: &mut u32,
) {
    if let (Some(a), Some(b)) = (viewer, candidate) {
        *compared += 1;
        if a == b {
            *matched += 1;
        }
    }
}

/// Distance sub-score in [0, 1]; 0 when either location is missing
#[inline]
fn distance_subscore(viewer: Option<&Location>, candidate: Option<&Location>) -> f64 {
    match (viewer, candidate) {
        (Some(v), Some(c)) => {
            let km = distance_km(v.latitude, v.longitude, c.latitude, c.longitude);
            (1.0 - km / DISTANCE_REFERENCE_KM).max(0.0)
        }
        _ => 0.0,
    }
}

/// Dealbreaker agreement over {smoking, drinking, kids}
///
/// Full credit on exact match, partial credit for the symmetric
/// non-smoker / prefer-non-smoker pair, zero otherwise. Keys missing on
/// either side contribute [`DEALBREAKER_MISSING_CREDIT`] and the average is
/// always taken over all three keys.
#[inline]
fn dealbreaker_agreement(viewer: &Dealbreakers, candidate: &Dealbreakers) -> f64 {
    let smoking = match (viewer.smoking, candidate.smoking) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(a), Some(b)) if smoking_partial(a, b) => SMOKING_PARTIAL_CREDIT,
        (Some(_), Some(_)) => 0.0,
        _ => DEALBREAKER_MISSING_CREDIT,
    };

    let drinking = match (viewer.drinking, candidate.drinking) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(_), Some(_)) => 0.0,
        _ => DEALBREAKER_MISSING_CREDIT,
    };

    let kids = match (viewer.kids, candidate.kids) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(_), Some(_)) => 0.0,
        _ => DEALBREAKER_MISSING_CREDIT,
    };

    (smoking + drinking + kids) / DEALBREAKER_KEY_COUNT
}

#[inline]
fn smoking_partial(a: SmokingStance, b: SmokingStance) -> bool {
    matches!(
        (a, b),
        (SmokingStance::NonSmoker, SmokingStance::PreferNonSmoker)
            | (SmokingStance::PreferNonSmoker, SmokingStance::NonSmoker)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DrinkingStance, KidsStance, PlanningStyle, SocialStyle};

    fn candidate_with_interests(interests: &[&str]) -> Profile {
        Profile {
            id: "c1".to_string(),
            name: "Candidate".to_string(),
            age: 27,
            gender: None,
            photos: vec!["photo-1".to_string()],
            bio: String::new(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            personality: Personality::default(),
            location: None,
            dealbreakers: Dealbreakers::default(),
            attributes: Default::default(),
        }
    }

    fn viewer_with_interests(interests: &[&str]) -> UserPreferences {
        UserPreferences {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_reference_scenario() {
        // Travel/Yoga vs Travel/Music, no personality, dealbreakers or
        // locations: 20 + 15 + 0 + 0 = 35
        let viewer = viewer_with_interests(&["Travel", "Yoga"]);
        let candidate = candidate_with_interests(&["Travel", "Music"]);

        let result = score(&ScoringWeights::default(), &viewer, &candidate);

        assert_eq!(result.score, 35);
        assert_eq!(
            result.reasons,
            vec![MatchReason::CommonInterests {
                highlight: "Travel".to_string(),
                shared: vec!["Travel".to_string()],
            }]
        );
    }

    #[test]
    fn test_score_is_deterministic() {
        let viewer = viewer_with_interests(&["Travel", "Yoga"]);
        let candidate = candidate_with_interests(&["Travel", "Music"]);
        let weights = ScoringWeights::default();

        let first = score(&weights, &viewer, &candidate);
        let second = score(&weights, &viewer, &candidate);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_interests_keep_viewer_ordering() {
        let viewer = viewer_with_interests(&["Yoga", "Travel", "Food"]);
        let candidate = candidate_with_interests(&["Food", "Travel"]);

        let (_, shared) = interest_overlap(&viewer.interests, &candidate.interests);
        assert_eq!(shared, vec!["Travel".to_string(), "Food".to_string()]);
    }

    #[test]
    fn test_interest_overlap_empty_denominator() {
        let (s, shared) = interest_overlap(&[], &[]);
        assert_eq!(s, 0.0);
        assert!(shared.is_empty());
    }

    #[test]
    fn test_personality_neutral_when_nothing_comparable() {
        let sim = personality_similarity(&Personality::default(), &Personality::default());
        assert_eq!(sim, PERSONALITY_NEUTRAL);
    }

    #[test]
    fn test_personality_only_compares_shared_traits() {
        let viewer = Personality {
            social: Some(SocialStyle::Introvert),
            planning: Some(PlanningStyle::Planner),
            ..Default::default()
        };
        let candidate = Personality {
            social: Some(SocialStyle::Introvert),
            // planning unanswered: not comparable, not a mismatch
            ..Default::default()
        };

        assert_eq!(personality_similarity(&viewer, &candidate), 1.0);
    }

    #[test]
    fn test_similar_personality_reason_threshold() {
        let viewer = UserPreferences {
            personality: Personality {
                social: Some(SocialStyle::Extrovert),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut candidate = candidate_with_interests(&[]);
        candidate.personality.social = Some(SocialStyle::Extrovert);

        let result = score(&ScoringWeights::default(), &viewer, &candidate);
        assert!(result.reasons.contains(&MatchReason::SimilarPersonality));
    }

    #[test]
    fn test_distance_subscore_missing_location_is_zero() {
        let here = Location {
            latitude: 19.0760,
            longitude: 72.8777,
            city: None,
        };
        assert_eq!(distance_subscore(Some(&here), None), 0.0);
        assert_eq!(distance_subscore(None, None), 0.0);
    }

    #[test]
    fn test_distance_subscore_beyond_reference_radius() {
        // Mumbai to Bangalore, ~845 km: far past the 100 km reference
        let mumbai = Location {
            latitude: 19.0760,
            longitude: 72.8777,
            city: None,
        };
        let bangalore = Location {
            latitude: 12.9716,
            longitude: 77.5946,
            city: None,
        };
        assert_eq!(distance_subscore(Some(&mumbai), Some(&bangalore)), 0.0);
    }

    #[test]
    fn test_dealbreaker_partial_smoking_credit_is_symmetric() {
        let a = Dealbreakers {
            smoking: Some(SmokingStance::NonSmoker),
            ..Default::default()
        };
        let b = Dealbreakers {
            smoking: Some(SmokingStance::PreferNonSmoker),
            ..Default::default()
        };

        let forward = dealbreaker_agreement(&a, &b);
        let backward = dealbreaker_agreement(&b, &a);
        assert_eq!(forward, backward);
        assert!((forward - SMOKING_PARTIAL_CREDIT / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_dealbreaker_missing_keys_dilute_average() {
        // One agreeing key out of three still averages over three
        let a = Dealbreakers {
            drinking: Some(DrinkingStance::Socially),
            ..Default::default()
        };
        let b = Dealbreakers {
            drinking: Some(DrinkingStance::Socially),
            ..Default::default()
        };
        assert!((dealbreaker_agreement(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_conservation() {
        let mumbai = Location {
            latitude: 19.0760,
            longitude: 72.8777,
            city: None,
        };
        let viewer = UserPreferences {
            interests: vec!["Travel".to_string(), "Yoga".to_string()],
            personality: Personality {
                social: Some(SocialStyle::Ambivert),
                planning: Some(PlanningStyle::Planner),
                ..Default::default()
            },
            dealbreakers: Dealbreakers {
                smoking: Some(SmokingStance::NonSmoker),
                drinking: Some(DrinkingStance::Socially),
                kids: Some(KidsStance::Open),
                pets: None,
            },
            location: Some(mumbai.clone()),
            age_range: None,
            max_distance_km: None,
        };
        let mut candidate = candidate_with_interests(&["Travel", "Food"]);
        candidate.personality = viewer.personality;
        candidate.dealbreakers = viewer.dealbreakers;
        candidate.location = Some(Location {
            latitude: 19.2,
            longitude: 72.9,
            city: None,
        });

        let weights = ScoringWeights::default();
        let (_, breakdown) = score_with_breakdown(&weights, &viewer, &candidate);

        let recomputed = breakdown.interests * weights.interests
            + breakdown.personality * weights.personality
            + breakdown.distance * weights.distance
            + breakdown.dealbreakers * weights.dealbreakers;
        assert!((recomputed - breakdown.weighted_total).abs() < 1e-9);
    }
}
