//! On-disk cache of the raw product rows.
//!
//! Rows are kept as fetched, so normalization changes apply to cached data
//! without a refetch. A cache older than its max age reads as empty.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::product::Product;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedRows {
    fetched_at: DateTime<Utc>,
    rows: Vec<Value>,
}

pub struct ProductCache {
    path: PathBuf,
    max_age: Duration,
}

impl ProductCache {
    /// Cache at `path`, valid for 24 hours.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: Duration::hours(24),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, rows: &[Value], now: DateTime<Utc>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let cached = CachedRows {
            fetched_at: now,
            rows: rows.to_vec(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&cached)?)?;
        Ok(())
    }

    /// Normalized products, or `None` when the cache is missing or stale.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Option<Vec<Product>>, CacheError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let cached: CachedRows = serde_json::from_str(&json)?;
        if now - cached.fetched_at >= self.max_age {
            debug!(path = %self.path.display(), fetched_at = %cached.fetched_at, "product cache stale");
            return Ok(None);
        }
        Ok(Some(Product::from_rows(&cached.rows)))
    }
}
