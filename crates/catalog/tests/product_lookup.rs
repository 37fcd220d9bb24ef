use chrono::{NaiveDate, TimeZone, Utc};
use opsfloor_catalog::{format_main_line, search, ActionFlags, ProductCache, SampleRecord};
use serde_json::json;

#[test]
fn cached_export_feeds_search_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ProductCache::new(dir.path().join("cache").join("products.json"));
    let fetched = Utc.with_ymd_and_hms(2026, 2, 26, 7, 30, 0).unwrap();

    let rows = vec![
        json!({ "item_id": "SB1042", "customer": "Acme", "formula": "Honey Roast",
                "pack_count": 6, "unit_size": "2.5", "unit_size_uom": "lb",
                "description": "Honey Roast Peanuts" }),
        json!({ "item_id": "SB2001", "description": "Salted Cashews", "md": true }),
        json!({ "description": "no id, dropped" }),
    ];
    cache.save(&rows, fetched).unwrap();
    let products = cache.load(fetched).unwrap().unwrap();
    assert_eq!(products.len(), 2);

    let hits = search(&products, "cashew");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].item_number, "SB2001");
    assert_eq!(format_main_line(&products[0]), "1042 | Acme | Honey Roast | 6x 2.5#");

    let at = NaiveDate::from_ymd_opt(2026, 2, 26).unwrap().and_hms_opt(14, 0, 0).unwrap();
    let active = vec!["SB1042".to_string(), "SB2001".to_string()];
    let record = SampleRecord::new(14, at)
        .with_active(&active, &products)
        .with_extra(Some("SB2001"), &products)
        .with_flags(ActionFlags::default());
    assert_eq!(record.active_products, vec!["1042", "2001"]);
    assert_eq!(record.extra_product.as_deref(), Some("2001"));
    assert!(!record.notes.manual_set_extra_since_last_sample);
}
