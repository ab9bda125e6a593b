use crate::core::distance::distance_km;
use crate::models::{
    Dealbreakers, EducationLevel, ExclusionSets, FilterCriteria, Location, Personality, Profile,
    UserPreferences,
};

/// Permissive age floor when neither criteria nor preferences set one
pub const DEFAULT_MIN_AGE: u8 = 18;
/// Permissive age ceiling when neither criteria nor preferences set one
pub const DEFAULT_MAX_AGE: u8 = 100;
/// Permissive search radius when neither criteria nor preferences set one
pub const DEFAULT_RADIUS_KM: u16 = 500;

/// Filter settings after resolving the criteria-over-preferences fallback
///
/// Age and distance fall back from criteria to the viewer's preferences to
/// the permissive defaults. Every other field filters only when the criteria
/// explicitly set it; unset means no filtering, never "inherit the viewer's
/// own value", so an empty filter can never narrow the candidate set.
#[derive(Debug, Clone)]
pub struct EffectiveCriteria {
    pub min_age: u8,
    pub max_age: u8,
    pub radius_km: u16,
    pub gender: Option<String>,
    pub interests: Vec<String>,
    pub personality: Personality,
    pub dealbreakers: Dealbreakers,
    pub education: Option<EducationLevel>,
    pub profession: Option<String>,
}

/// Resolve the effective filter settings for one ranking pass
pub fn resolve_criteria(
    viewer: &UserPreferences,
    criteria: Option<&FilterCriteria>,
) -> EffectiveCriteria {
    let age_range = criteria
        .and_then(|c| c.age_range)
        .or(viewer.age_range);
    let radius_km = criteria
        .and_then(|c| c.max_distance_km)
        .or(viewer.max_distance_km)
        .unwrap_or(DEFAULT_RADIUS_KM);

    EffectiveCriteria {
        min_age: age_range.map(|r| r.min).unwrap_or(DEFAULT_MIN_AGE),
        max_age: age_range.map(|r| r.max).unwrap_or(DEFAULT_MAX_AGE),
        radius_km,
        gender: criteria.and_then(|c| c.gender.clone()).filter(|g| !g.is_empty()),
        interests: criteria.map(|c| c.interests.clone()).unwrap_or_default(),
        personality: criteria.map(|c| c.personality).unwrap_or_default(),
        dealbreakers: criteria.map(|c| c.dealbreakers).unwrap_or_default(),
        education: criteria.and_then(|c| c.education),
        profession: criteria
            .and_then(|c| c.profession.clone())
            .filter(|p| !p.is_empty()),
    }
}

/// Run all filter stages against one candidate
///
/// Pure AND; the first failing stage short-circuits. Exclusion is evaluated
/// last, matching the reference stage order.
pub fn passes_filters(
    candidate: &Profile,
    viewer_location: Option<&Location>,
    criteria: &EffectiveCriteria,
    excluded: &ExclusionSets,
) -> bool {
    if !within_age(candidate, criteria) {
        return false;
    }
    if !within_distance(candidate, viewer_location, criteria) {
        return false;
    }
    if !matches_gender(candidate, criteria) {
        return false;
    }
    if !shares_interest(candidate, criteria) {
        return false;
    }
    if !matches_personality(candidate, criteria) {
        return false;
    }
    if !matches_dealbreakers(candidate, criteria) {
        return false;
    }
    if !matches_attributes(candidate, criteria) {
        return false;
    }
    !excluded.contains(&candidate.id)
}

#[inline]
fn within_age(candidate: &Profile, criteria: &EffectiveCriteria) -> bool {
    candidate.age >= criteria.min_age && candidate.age <= criteria.max_age
}

/// Distance never excludes on missing data; only a known-too-far candidate
/// fails this stage
#[inline]
fn within_distance(
    candidate: &Profile,
    viewer_location: Option<&Location>,
    criteria: &EffectiveCriteria,
) -> bool {
    match (viewer_location, candidate.location.as_ref()) {
        (Some(v), Some(c)) => {
            distance_km(v.latitude, v.longitude, c.latitude, c.longitude)
                <= criteria.radius_km as f64
        }
        _ => true,
    }
}

#[inline]
fn matches_gender(candidate: &Profile, criteria: &EffectiveCriteria) -> bool {
    match &criteria.gender {
        // Gender is rarely populated on profiles today; a candidate without
        // one fails an explicit gender filter rather than slipping through
        Some(wanted) => candidate.gender.as_deref() == Some(wanted.as_str()),
        None => true,
    }
}

#[inline]
fn shares_interest(candidate: &Profile, criteria: &EffectiveCriteria) -> bool {
    if criteria.interests.is_empty() {
        return true;
    }
    criteria
        .interests
        .iter()
        .any(|tag| candidate.interests.contains(tag))
}

/// Every trait the criteria set must match exactly; a candidate who left the
/// trait unanswered fails that stage
#[inline]
fn matches_personality(candidate: &Profile, criteria: &EffectiveCriteria) -> bool {
    let wanted = &criteria.personality;
    let got = &candidate.personality;

    if let Some(v) = wanted.social {
        if got.social != Some(v) {
            return false;
        }
    }
    if let Some(v) = wanted.planning {
        if got.planning != Some(v) {
            return false;
        }
    }
    if let Some(v) = wanted.romantic {
        if got.romantic != Some(v) {
            return false;
        }
    }
    if let Some(v) = wanted.morning {
        if got.morning != Some(v) {
            return false;
        }
    }
    true
}

#[inline]
fn matches_dealbreakers(candidate: &Profile, criteria: &EffectiveCriteria) -> bool {
    let wanted = &criteria.dealbreakers;
    let got = &candidate.dealbreakers;

    if let Some(v) = wanted.kids {
        if got.kids != Some(v) {
            return false;
        }
    }
    if let Some(v) = wanted.smoking {
        if got.smoking != Some(v) {
            return false;
        }
    }
    if let Some(v) = wanted.pets {
        if got.pets != Some(v) {
            return false;
        }
    }
    if let Some(v) = wanted.drinking {
        if got.drinking != Some(v) {
            return false;
        }
    }
    true
}

#[inline]
fn matches_attributes(candidate: &Profile, criteria: &EffectiveCriteria) -> bool {
    if let Some(wanted) = criteria.education {
        if candidate.attributes.education != Some(wanted) {
            return false;
        }
    }
    if let Some(needle) = &criteria.profession {
        let Some(profession) = &candidate.attributes.profession else {
            return false;
        };
        if !profession.to_lowercase().contains(&needle.to_lowercase()) {
            return false;
        }
    }
    true
}
