use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub storage: StorageConfig,
    pub timers: TimerConfig,
    pub production: ProductionConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `OPSFLOOR_PROFILE` env var. When set (e.g. `LINE2`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("OPSFLOOR_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            storage: StorageConfig::from_env_profiled(p),
            timers: TimerConfig::from_env_profiled(p),
            production: ProductionConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  storage:     data_dir={}, rotation={}, timers={}",
            self.storage.data_dir.display(),
            self.storage.rotation_file,
            self.storage.timers_file
        );
        tracing::info!(
            "  timers:      check_interval={}s, sound={}",
            self.timers.check_interval_secs,
            self.timers.sound_on
        );
        tracing::info!("  production:  day_start_hour={}", self.production.day_start_hour);
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub rotation_file: String,
    pub timers_file: String,
    pub schedule_file: String,
    pub products_cache_file: String,
    pub label_template_file: String,
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            data_dir: PathBuf::from(profiled_env_or(p, "DATA_DIR", "data")),
            rotation_file: profiled_env_or(p, "ROTATION_STATE_FILE", "samples_rotation_v1.json"),
            timers_file: profiled_env_or(p, "TIMERS_FILE", "timers.json"),
            schedule_file: profiled_env_or(p, "SCHEDULE_FILE", "peanut_test_schedule.json"),
            products_cache_file: profiled_env_or(p, "PRODUCTS_CACHE_FILE", "finished_products_cache.json"),
            label_template_file: profiled_env_or(p, "LABEL_TEMPLATE_FILE", "label.html"),
        }
    }

    pub fn rotation_path(&self) -> PathBuf {
        self.data_dir.join(&self.rotation_file)
    }

    pub fn timers_path(&self) -> PathBuf {
        self.data_dir.join(&self.timers_file)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedule_file)
    }

    pub fn products_cache_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_cache_file)
    }

    pub fn label_template_path(&self) -> PathBuf {
        self.data_dir.join(&self.label_template_file)
    }
}

// ── Timers ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Seconds between due checks.
    pub check_interval_secs: u64,
    pub sound_on: bool,
}

impl TimerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            check_interval_secs: profiled_env_u64(p, "TIMER_CHECK_INTERVAL_SECS", 60).max(1),
            sound_on: profiled_env_bool(p, "TIMER_SOUND", true),
        }
    }
}

// ── Production day ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionConfig {
    /// Hour (0-23) at which a new production day begins.
    pub day_start_hour: u32,
}

impl ProductionConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            day_start_hour: profiled_env_u32(p, "PRODUCTION_DAY_START_HOUR", 7).min(23),
        }
    }
}
