//! Finished-product records.
//!
//! Rows come from several exports whose column names drifted over time, so
//! every field is resolved through a fallback chain of column names. A
//! column holding `null` counts as absent and the chain moves on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::strip_item_number_prefix;

/// Metal detector column: either a yes/no flag or a detector line name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetalDetector {
    Flag(bool),
    Line(String),
}

/// A normalized finished product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub customer: Option<String>,
    pub formula: Option<String>,
    pub pack_count: Option<f64>,
    pub unit_size: Option<String>,
    pub unit_size_uom: Option<String>,
    pub container_1: Option<String>,
    pub product_name: Option<String>,
    pub name: Option<String>,
    /// Raw item number, possibly carrying the `SB` prefix.
    pub item_number: String,
    pub special_sampling_flag: bool,
    pub special_recipe_flag: bool,
    pub line_number: Option<String>,
    pub metal_detector: Option<MetalDetector>,
    pub country_code: Option<String>,
    pub usda_flag: bool,
}

/// First non-null value among `keys`.
fn first<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .find(|v| !v.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text(row: &Value, keys: &[&str]) -> Option<String> {
    first(row, keys).and_then(scalar_text)
}

fn number(row: &Value, keys: &[&str]) -> Option<f64> {
    match first(row, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truthy(row: &Value, key: &str) -> bool {
    match row.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        _ => false,
    }
}

impl Product {
    /// Normalize a loosely-typed row. `None` when no id column is present.
    pub fn from_row(row: &Value) -> Option<Self> {
        let id = text(row, &["item_id", "id", "product_id"])?;
        let metal_detector = match first(row, &["metal_detector", "md"]) {
            Some(Value::Bool(b)) => Some(MetalDetector::Flag(*b)),
            Some(other) => scalar_text(other).map(MetalDetector::Line),
            None => None,
        };

        Some(Self {
            customer: text(row, &["customer"]),
            formula: text(row, &["formula", "formula_name"]),
            pack_count: number(row, &["pack_count", "packCount"]),
            unit_size: text(row, &["unit_size", "unitSize"]),
            unit_size_uom: text(row, &["unit_size_uom", "unitSizeUom"]),
            container_1: text(row, &["container_1", "container"]),
            product_name: text(
                row,
                &["description", "product_name", "name", "product", "itemNumber", "item_number"],
            ),
            name: text(row, &["description", "name", "product_name", "product"]),
            item_number: text(row, &["item_id", "item_number", "itemNumber", "id"])
                .unwrap_or_default(),
            special_sampling_flag: truthy(row, "special_sampling_flag"),
            special_recipe_flag: truthy(row, "special_recipe_flag"),
            line_number: text(row, &["line_number", "line", "line_no"]),
            metal_detector,
            country_code: text(row, &["country_code", "country"]),
            usda_flag: truthy(row, "usda_flag"),
            id,
        })
    }

    /// Normalize every row, dropping rows without an id.
    pub fn from_rows(rows: &[Value]) -> Vec<Self> {
        rows.iter().filter_map(Self::from_row).collect()
    }

    /// Display name: product name, then name.
    pub fn display_name(&self) -> Option<&str> {
        self.product_name.as_deref().or(self.name.as_deref())
    }

    /// Key written to sample records: the stripped item number, falling
    /// back to the product name, then the id.
    pub fn record_key(&self) -> String {
        if !self.item_number.is_empty() {
            return strip_item_number_prefix(&self.item_number);
        }
        self.product_name.clone().unwrap_or_else(|| self.id.clone())
    }

    /// Whether `key` names this product by id or item number.
    pub fn matches_key(&self, key: &str) -> bool {
        self.id == key || self.item_number == key
    }
}
