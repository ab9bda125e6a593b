use crate::core::gesture::GestureThresholds;
use crate::core::scoring::ScoringWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub quota: QuotaSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Sub-score weights; must sum to 100
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_personality_weight")]
    pub personality: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_dealbreakers_weight")]
    pub dealbreakers: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            personality: default_personality_weight(),
            distance: default_distance_weight(),
            dealbreakers: default_dealbreakers_weight(),
        }
    }
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(value: WeightsConfig) -> Self {
        Self {
            interests: value.interests,
            personality: value.personality,
            distance: value.distance,
            dealbreakers: value.dealbreakers,
        }
    }
}

fn default_interests_weight() -> f64 { 40.0 }
fn default_personality_weight() -> f64 { 30.0 }
fn default_distance_weight() -> f64 { 20.0 }
fn default_dealbreakers_weight() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct GestureSettings {
    #[serde(default = "default_commit_distance_px")]
    pub commit_distance_px: f64,
    #[serde(default = "default_commit_velocity_px_s")]
    pub commit_velocity_px_s: f64,
    #[serde(default = "default_tap_slop_px")]
    pub tap_slop_px: f64,
    #[serde(default = "default_exit_duration_ms")]
    pub exit_duration_ms: u64,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            commit_distance_px: default_commit_distance_px(),
            commit_velocity_px_s: default_commit_velocity_px_s(),
            tap_slop_px: default_tap_slop_px(),
            exit_duration_ms: default_exit_duration_ms(),
            advance_delay_ms: default_advance_delay_ms(),
        }
    }
}

impl From<GestureSettings> for GestureThresholds {
    fn from(value: GestureSettings) -> Self {
        Self {
            commit_distance_px: value.commit_distance_px,
            commit_velocity_px_s: value.commit_velocity_px_s,
            tap_slop_px: value.tap_slop_px,
            exit_duration_ms: value.exit_duration_ms,
            advance_delay_ms: value.advance_delay_ms,
            ..Default::default()
        }
    }
}

fn default_commit_distance_px() -> f64 { 100.0 }
fn default_commit_velocity_px_s() -> f64 { 500.0 }
fn default_tap_slop_px() -> f64 { 25.0 }
fn default_exit_duration_ms() -> u64 { 300 }
fn default_advance_delay_ms() -> u64 { 350 }

#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSettings {
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
        }
    }
}

fn default_daily_limit() -> u32 { 20 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// When set, mutual matches are drawn with this probability instead of
    /// consulting the like index. Offline demos only.
    #[serde(default)]
    pub demo_match_probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "deckmatch-state.json".to_string()
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Later sources override earlier ones:
    /// 1. Built-in defaults
    /// 2. config/default.toml, then config/local.toml (both optional)
    /// 3. Environment variables prefixed with DECKMATCH__
    ///    (e.g. DECKMATCH__QUOTA__DAILY_LIMIT -> quota.daily_limit)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("DECKMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from an explicit path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DECKMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        let weights = WeightsConfig::default();
        let total =
            weights.interests + weights.personality + weights.distance + weights.dealbreakers;
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_default_gesture_thresholds() {
        let gesture = GestureSettings::default();
        assert_eq!(gesture.commit_distance_px, 100.0);
        assert_eq!(gesture.commit_velocity_px_s, 500.0);
        assert_eq!(gesture.tap_slop_px, 25.0);
        assert_eq!(gesture.exit_duration_ms, 300);
        assert_eq!(gesture.advance_delay_ms, 350);
    }

    #[test]
    fn test_demo_probability_off_by_default() {
        let settings = Settings::default();
        assert!(settings.matching.demo_match_probability.is_none());
    }

    #[test]
    fn test_default_quota_limit() {
        assert_eq!(QuotaSettings::default().daily_limit, 20);
    }
}
