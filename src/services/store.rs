use crate::models::{DailyQuotaState, DecisionLog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur saving state
///
/// Loading never fails: missing or corrupt state reads as the default.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One liked/passed decision with its timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEntry {
    pub id: String,
    pub at: DateTime<Utc>,
}

/// A blocked or reported profile with the reason given
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagEntry {
    pub id: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

/// Everything the caller persists between sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default)]
    pub liked: Vec<DecisionEntry>,
    #[serde(default)]
    pub passed: Vec<DecisionEntry>,
    #[serde(default)]
    pub blocked: Vec<FlagEntry>,
    #[serde(default)]
    pub reported: Vec<FlagEntry>,
    #[serde(default)]
    pub quota: Option<DailyQuotaState>,
    #[serde(default)]
    pub unlimited: bool,
}

impl StoredState {
    /// Rebuild the decision log from the persisted entries
    pub fn decision_log(&self) -> DecisionLog {
        DecisionLog::from_sets(
            self.liked.iter().map(|e| e.id.clone()).collect(),
            self.passed.iter().map(|e| e.id.clone()).collect(),
        )
    }

    pub fn blocked_ids(&self) -> HashSet<String> {
        self.blocked.iter().map(|e| e.id.clone()).collect()
    }

    pub fn reported_ids(&self) -> HashSet<String> {
        self.reported.iter().map(|e| e.id.clone()).collect()
    }
}

/// Load/save seam for swipe state; owned entirely by the caller
///
/// The matching and gesture core never touches storage directly.
pub trait SwipeStore {
    fn load(&self) -> StoredState;
    fn save(&self, state: &StoredState) -> Result<(), StoreError>;
}

/// JSON file store
///
/// A missing, unreadable or structurally wrong file loads as the default
/// state; corrupt persisted data must never take the feed down.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SwipeStore for JsonFileStore {
    fn load(&self) -> StoredState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("No stored state at {}: {}", self.path.display(), e);
                return StoredState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    "Stored state at {} is corrupt ({}), starting fresh",
                    self.path.display(),
                    e
                );
                StoredState::default()
            }
        }
    }

    fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        tracing::trace!("Saved state to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and demos
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoredState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SwipeStore for MemoryStore {
    fn load(&self) -> StoredState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        if let Ok(mut guard) = self.state.lock() {
            *guard = state.clone();
        }
        Ok(())
    }
}
