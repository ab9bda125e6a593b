use serde::{Deserialize, Serialize};

/// What a committed swipe decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Accept,
    Reject,
}

/// A committed accept/reject decision, for the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEvent {
    pub kind: DecisionKind,
    pub candidate_id: String,
    pub at: chrono::DateTime<chrono::Utc>,
}

/// Result of an accept that passed the quota check, for the notification layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub candidate_id: String,
    pub matched: bool,
}

/// Everything the feed session emits to its collaborators
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Decision(DecisionEvent),
    Match(MatchEvent),
    /// The daily like quota denied an accept; nothing was recorded
    QuotaExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_event_serializes_camel_case() {
        let event = DecisionEvent {
            kind: DecisionKind::Accept,
            candidate_id: "c1".to_string(),
            at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"candidateId\":\"c1\""));
        assert!(json.contains("\"kind\":\"accept\""));
    }
}
