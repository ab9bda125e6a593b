use crate::models::DecisionLog;
use std::collections::{HashMap, HashSet};

/// Answers "has `user_id` recorded a like for `target_id`?"
///
/// The seam between match evaluation and however likes are actually stored.
pub trait LikeLookup {
    fn has_liked(&self, user_id: &str, target_id: &str) -> bool;
}

/// In-memory index of who liked whom
#[derive(Debug, Clone, Default)]
pub struct LikeIndex {
    likes: HashMap<String, HashSet<String>>,
}

impl LikeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: &str, target_id: &str) {
        self.likes
            .entry(user_id.to_string())
            .or_default()
            .insert(target_id.to_string());
    }
}

impl LikeLookup for LikeIndex {
    fn has_liked(&self, user_id: &str, target_id: &str) -> bool {
        self.likes
            .get(user_id)
            .map(|targets| targets.contains(target_id))
            .unwrap_or(false)
    }
}

/// Offline-demo stand-in that answers with a fixed probability
///
/// The reference system shipped a 30% random draw in place of a real
/// mutual-like lookup. That behavior survives here only for demo builds and
/// is selected by an explicit configuration flag, never by default.
#[derive(Debug, Clone, Copy)]
pub struct DemoLikeLookup {
    probability: f64,
}

impl DemoLikeLookup {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl LikeLookup for DemoLikeLookup {
    fn has_liked(&self, _user_id: &str, _target_id: &str) -> bool {
        rand::random::<f64>() < self.probability
    }
}

/// Outcome of an accept action that already passed the quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptOutcome {
    /// The like was recorded; always true once this returns
    pub recorded: bool,
    /// The candidate had already liked the viewer back
    pub matched: bool,
}

/// Decides whether an accept produces a mutual match
///
/// Must only run after the quota allowed the accept. The like is recorded
/// unconditionally; `matched` reports mutuality and owns no further state.
pub struct MatchEvaluator {
    viewer_id: String,
    likes: Box<dyn LikeLookup + Send + Sync>,
}

impl MatchEvaluator {
    pub fn new(viewer_id: impl Into<String>, likes: Box<dyn LikeLookup + Send + Sync>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            likes,
        }
    }

    pub fn evaluate_accept(
        &self,
        decisions: &mut DecisionLog,
        candidate_id: &str,
    ) -> AcceptOutcome {
        decisions.record_like(candidate_id);
        let matched = self.likes.has_liked(candidate_id, &self.viewer_id);
        if matched {
            tracing::info!("Mutual match with {}", candidate_id);
        }
        AcceptOutcome {
            recorded: true,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_records_like_and_detects_mutual() {
        let mut index = LikeIndex::new();
        index.insert("candidate-1", "viewer");

        let evaluator = MatchEvaluator::new("viewer", Box::new(index));
        let mut decisions = DecisionLog::new();

        let outcome = evaluator.evaluate_accept(&mut decisions, "candidate-1");
        assert!(outcome.recorded);
        assert!(outcome.matched);
        assert!(decisions.has_liked("candidate-1"));
    }

    #[test]
    fn test_accept_without_mutual_like() {
        let evaluator = MatchEvaluator::new("viewer", Box::new(LikeIndex::new()));
        let mut decisions = DecisionLog::new();

        let outcome = evaluator.evaluate_accept(&mut decisions, "candidate-2");
        assert!(outcome.recorded);
        assert!(!outcome.matched);
        assert!(decisions.has_liked("candidate-2"));
    }

    #[test]
    fn test_demo_lookup_extremes() {
        let never = DemoLikeLookup::new(0.0);
        let always = DemoLikeLookup::new(1.0);
        for _ in 0..20 {
            assert!(!never.has_liked("a", "b"));
            assert!(always.has_liked("a", "b"));
        }
    }

    #[test]
    fn test_like_index_direction_matters() {
        let mut index = LikeIndex::new();
        index.insert("a", "b");
        assert!(index.has_liked("a", "b"));
        assert!(!index.has_liked("b", "a"));
    }
}
