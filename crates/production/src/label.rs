//! Print-label rendering.
//!
//! Label templates are HTML files with `{{ lot_code }}` and `{{ best_by }}`
//! placeholders. Templates are arbitrary strings, so a fresh
//! [`minijinja::Environment`] is built per render.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::day::{best_by, lot_code};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(String),
}

/// Values substituted into a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelContext {
    pub lot_code: String,
    pub best_by: String,
}

impl LabelContext {
    /// Lot code and best-by for a production day.
    pub fn for_day(day: NaiveDate) -> Self {
        Self {
            lot_code: lot_code(day),
            best_by: best_by(day),
        }
    }
}

#[derive(Debug, Default)]
pub struct LabelRenderer {
    _private: (),
}

impl LabelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_env() -> minijinja::Environment<'static> {
        minijinja::Environment::new()
    }

    pub fn render(&self, template: &str, ctx: &LabelContext) -> Result<String, LabelError> {
        Self::build_env()
            .render_str(template, ctx)
            .map_err(|e| LabelError::Template(e.to_string()))
    }

    pub fn render_file(&self, path: &Path, ctx: &LabelContext) -> Result<String, LabelError> {
        let template = std::fs::read_to_string(path)?;
        self.render(&template, ctx)
    }
}
