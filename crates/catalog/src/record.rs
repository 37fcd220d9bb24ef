//! Sample record payload written when a sample is taken.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::strip_item_number_prefix;
use crate::product::Product;
use crate::search::find_product;

/// Operator actions since the previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFlags {
    pub drag_reorder: bool,
    pub manual_extra_set: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleNotes {
    /// Id the rotation picked, prefix stripped.
    pub predicted_extra: Option<String>,
    /// Key of the product actually recorded as the extra.
    pub selected_extra: Option<String>,
    pub drag_reorder_since_last_sample: bool,
    pub manual_set_extra_since_last_sample: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub production_day_id: Option<Uuid>,
    pub hour_code: u32,
    pub sampled_at: NaiveDateTime,
    pub active_products: Vec<String>,
    pub extra_product: Option<String>,
    pub cycle_number: u32,
    pub notes: SampleNotes,
}

impl SampleRecord {
    pub fn new(hour_code: u32, sampled_at: NaiveDateTime) -> Self {
        Self {
            production_day_id: None,
            hour_code,
            sampled_at,
            active_products: Vec::new(),
            extra_product: None,
            cycle_number: 0,
            notes: SampleNotes::default(),
        }
    }

    pub fn with_production_day(mut self, id: Uuid) -> Self {
        self.production_day_id = Some(id);
        self
    }

    /// Record keys of the active products, in active order. Ids with no
    /// matching product are skipped.
    pub fn with_active(mut self, active_ids: &[String], products: &[Product]) -> Self {
        self.active_products = active_ids
            .iter()
            .filter_map(|id| find_product(products, id))
            .map(Product::record_key)
            .collect();
        self
    }

    /// Set the extra from the rotation's pick.
    pub fn with_extra(mut self, picked: Option<&str>, products: &[Product]) -> Self {
        let selected = picked
            .and_then(|key| find_product(products, key))
            .map(Product::record_key);
        self.notes.predicted_extra = picked.map(strip_item_number_prefix);
        self.notes.selected_extra = selected.clone();
        self.extra_product = selected;
        self
    }

    pub fn with_flags(mut self, flags: ActionFlags) -> Self {
        self.notes.drag_reorder_since_last_sample = flags.drag_reorder;
        self.notes.manual_set_extra_since_last_sample = flags.manual_extra_set;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn products() -> Vec<Product> {
        Product::from_rows(&[
            json!({ "item_id": "SB100", "description": "Salted" }),
            json!({ "item_id": "SB200", "description": "Unsalted" }),
            json!({ "product_id": "loose-1", "name": "Loose Blend" }),
        ])
    }

    #[test]
    fn payload_shape() {
        let at = NaiveDate::from_ymd_opt(2026, 2, 26).unwrap().and_hms_opt(3, 0, 0).unwrap();
        let active = vec!["SB100".to_string(), "missing".to_string(), "loose-1".to_string()];
        let record = SampleRecord::new(3, at)
            .with_active(&active, &products())
            .with_extra(Some("SB200"), &products())
            .with_flags(ActionFlags {
                drag_reorder: true,
                manual_extra_set: false,
            });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["hour_code"], json!(3));
        assert_eq!(value["sampled_at"], json!("2026-02-26T03:00:00"));
        assert_eq!(value["active_products"], json!(["100", "Loose Blend"]));
        assert_eq!(value["extra_product"], json!("200"));
        assert_eq!(value["cycle_number"], json!(0));
        assert_eq!(value["production_day_id"], json!(null));
        assert_eq!(value["notes"]["predicted_extra"], json!("200"));
        assert_eq!(value["notes"]["drag_reorder_since_last_sample"], json!(true));
    }

    #[test]
    fn unknown_extra_keeps_prediction_only() {
        let at = NaiveDate::from_ymd_opt(2026, 2, 26).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let record = SampleRecord::new(9, at).with_extra(Some("SB999"), &products());
        assert_eq!(record.extra_product, None);
        assert_eq!(record.notes.predicted_extra.as_deref(), Some("999"));
    }
}
