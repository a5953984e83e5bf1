//! Runtime configuration loaded from a JSON file (`config.json` by default).
//!
//! Endpoints and credentials are plain fields; tuning knobs live under
//! `tuning` and every knob has a documented default, so a minimal config only
//! needs the tracker base URL and passkey.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub radarr_url: String,
    pub radarr_api_key: String,
    pub sonarr_url: String,
    pub sonarr_api_key: String,
    pub tracker_api_base: String,
    pub tracker_passkey: String,
    pub tuning: Tuning,
}

/// Tuning knobs for the matching engine.
///
/// Defaults: timeout 15s, 3 retries, backoff 1s * 2^attempt capped at 60s,
/// 300ms pacing between collected results, 5 workers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_secs: f64,
    pub backoff_factor: f64,
    pub max_backoff_secs: u64,
    pub pacing_delay_ms: u64,
    pub workers: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_retries: 3,
            backoff_base_secs: 1.0,
            backoff_factor: 2.0,
            max_backoff_secs: 60,
            pacing_delay_ms: 300,
            workers: 5,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// The tracker endpoint and passkey are required for every run.
    pub fn validate_tracker(&self) -> AppResult<()> {
        if self.tracker_api_base.trim().is_empty() {
            return Err(AppError::Configuration(
                "tracker_api_base is missing from the config".to_string(),
            ));
        }
        if self.tracker_passkey.trim().is_empty() {
            return Err(AppError::Configuration(
                "tracker_passkey is missing from the config".to_string(),
            ));
        }
        Ok(())
    }

    pub fn require_radarr(&self) -> AppResult<()> {
        if self.radarr_url.trim().is_empty() || self.radarr_api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "radarr_url and radarr_api_key are required for --radarr".to_string(),
            ));
        }
        Ok(())
    }

    pub fn require_sonarr(&self) -> AppResult<()> {
        if self.sonarr_url.trim().is_empty() || self.sonarr_api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "sonarr_url and sonarr_api_key are required for --sonarr".to_string(),
            ));
        }
        Ok(())
    }
}

impl Tuning {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }
}
