use crate::core::filters::{passes_filters, resolve_criteria, EffectiveCriteria};
use crate::core::scoring::{score, ScoringWeights};
use crate::models::{
    ExclusionSets, FilterCriteria, Profile, RankedCandidate, UserPreferences,
};
use thiserror::Error;

/// Errors for structurally invalid required input
///
/// Only upstream contract breaches surface here; absent optional data is
/// absorbed by scoring and filtering.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("profile at position {index} has no id")]
    MissingProfileId { index: usize },
}

/// Result of one ranking pass
#[derive(Debug, Clone)]
pub struct RankedDeck {
    pub candidates: Vec<RankedCandidate>,
    pub total_considered: usize,
}

/// The candidate filtering and ranking pipeline
///
/// Applies the hard exclusion rules and soft filter criteria, scores the
/// survivors and returns them sorted by score, best first. Ties keep their
/// input order.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    weights: ScoringWeights,
}

impl FilterPipeline {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Filter, score and rank candidates for the viewer
    ///
    /// An empty result is a valid output; relaxing filters is the caller's
    /// decision (see [`FilterPipeline::rank_excluding_only`]).
    pub fn filter_and_rank(
        &self,
        candidates: Vec<Profile>,
        viewer: &UserPreferences,
        criteria: Option<&FilterCriteria>,
        excluded: &ExclusionSets,
    ) -> Result<RankedDeck, PipelineError> {
        let effective = resolve_criteria(viewer, criteria);
        self.rank_internal(candidates, viewer, &effective, excluded, true)
    }

    /// Rank with every soft filter disabled, keeping only the exclusion rules
    ///
    /// The presentation layer calls this as a fallback when the filtered
    /// deck comes back empty, so the feed can always move forward. The
    /// pipeline never falls back on its own.
    pub fn rank_excluding_only(
        &self,
        candidates: Vec<Profile>,
        viewer: &UserPreferences,
        excluded: &ExclusionSets,
    ) -> Result<RankedDeck, PipelineError> {
        let effective = resolve_criteria(&UserPreferences::default(), None);
        self.rank_internal(candidates, viewer, &effective, excluded, false)
    }

    fn rank_internal(
        &self,
        candidates: Vec<Profile>,
        viewer: &UserPreferences,
        effective: &EffectiveCriteria,
        excluded: &ExclusionSets,
        apply_soft_filters: bool,
    ) -> Result<RankedDeck, PipelineError> {
        let total_considered = candidates.len();
        let viewer_location = viewer.location.as_ref();

        let mut ranked: Vec<RankedCandidate> = Vec::new();
        for (index, candidate) in candidates.into_iter().enumerate() {
            let candidate = normalize(candidate, index)?;

            let keep = if apply_soft_filters {
                passes_filters(&candidate, viewer_location, effective, excluded)
            } else {
                !excluded.contains(&candidate.id)
            };
            if !keep {
                continue;
            }

            let result = score(&self.weights, viewer, &candidate);
            ranked.push(RankedCandidate {
                profile: candidate,
                result,
            });
        }

        // Stable sort: equal scores keep their input order
        ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));

        tracing::debug!(
            "Ranked {} of {} candidates",
            ranked.len(),
            total_considered
        );

        Ok(RankedDeck {
            candidates: ranked,
            total_considered,
        })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Enforce required fields, degrading what can be degraded
///
/// A missing id is an upstream contract breach and fails the whole pass; a
/// missing photo list is patched with a generated placeholder reference.
fn normalize(mut candidate: Profile, index: usize) -> Result<Profile, PipelineError> {
    if candidate.id.is_empty() {
        return Err(PipelineError::MissingProfileId { index });
    }
    if candidate.photos.is_empty() {
        let placeholder = format!("placeholder-{}", uuid::Uuid::new_v4());
        tracing::warn!(
            "Profile {} has no photos, substituting {}",
            candidate.id,
            placeholder
        );
        candidate.photos.push(placeholder);
    }
    Ok(candidate)
}
