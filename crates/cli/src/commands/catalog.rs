use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Timelike, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use opsfloor_catalog::{
    format_main_line, metal_detector_label, normalize_country_code, search, ActionFlags, Product,
    ProductCache, SampleRecord,
};
use opsfloor_core::{Clock, Config, FloorError};
use opsfloor_production::production_day_uuid;

use super::print_json;
use super::production::calendar;
use super::rotation::scheduler;
use crate::cli::{CatalogCommand, SampleArgs};

fn cache(config: &Config) -> ProductCache {
    ProductCache::new(config.storage.products_cache_path())
}

fn read_rows(path: &Path) -> Result<Vec<Value>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows: Vec<Value> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of rows", path.display()))?;
    Ok(rows)
}

/// Cached products; an unreadable or stale cache reads as empty.
fn cached_products(config: &Config) -> Vec<Product> {
    match cache(config).load(Utc::now()) {
        Ok(Some(products)) => products,
        Ok(None) => {
            warn!("product cache missing or stale, run `opsfloor catalog import`");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "failed to read product cache");
            Vec::new()
        }
    }
}

pub fn run(cmd: CatalogCommand, config: &Config) -> Result<()> {
    match cmd {
        CatalogCommand::Import { path } => {
            let rows = read_rows(&path)?;
            let cache = cache(config);
            cache.save(&rows, Utc::now())?;
            let products = Product::from_rows(&rows);
            info!(
                rows = rows.len(),
                products = products.len(),
                cache = %cache.path().display(),
                "product cache refreshed"
            );
            print_json(&json!({ "imported": products.len() }))
        }
        CatalogCommand::Search { query } => {
            let products = cached_products(config);
            let hits: Vec<Value> = search(&products, &query)
                .into_iter()
                .map(|p| {
                    let mut line = format_main_line(p);
                    if line.is_empty() {
                        line = p.display_name().unwrap_or_default().to_string();
                    }
                    json!({
                        "id": p.id,
                        "line": line,
                        "metal_detector": metal_detector_label(p),
                        "country": p.country_code.as_deref().and_then(normalize_country_code),
                    })
                })
                .collect();
            print_json(&hits)
        }
    }
}

/// Commit the next extra and print the sample record for this hour.
pub fn take_sample(args: SampleArgs, config: &Config, clock: &dyn Clock) -> Result<()> {
    let (active, availability) = args.list.resolve()?;
    let now = clock.now();
    let hour = args.hour.unwrap_or_else(|| now.hour());

    let calendar = calendar(config);
    let sampled_at = calendar
        .sampled_at(hour, calendar.production_day(now))
        .ok_or_else(|| FloorError::InvalidArgument(format!("hour {hour} is outside 0-23")))?;
    let key = calendar.key(sampled_at);

    let pick = scheduler(config).pick_next_extra(&active, Some(&availability));
    let products = cached_products(config);

    let record = SampleRecord::new(hour, sampled_at)
        .with_production_day(production_day_uuid(key.shift_date, key.shift_number))
        .with_active(&active, &products)
        .with_extra(pick.next.as_deref(), &products)
        .with_flags(ActionFlags {
            drag_reorder: args.drag_reorder,
            manual_extra_set: args.manual_extra,
        });
    print_json(&record)
}
