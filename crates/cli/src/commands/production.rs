use anyhow::{Context, Result};
use serde_json::json;
use tracing::warn;

use opsfloor_core::{Clock, Config, FloorError};
use opsfloor_production::{
    best_by, lot_code, production_day_uuid, week_monday, LabelContext, LabelRenderer,
    ProductionCalendar, ShiftSchedule,
};

use super::print_json;
use crate::cli::ProductionCommand;

pub(crate) fn calendar(config: &Config) -> ProductionCalendar {
    ProductionCalendar::new(config.production.day_start_hour)
}

pub fn run(cmd: ProductionCommand, config: &Config, clock: &dyn Clock) -> Result<()> {
    let calendar = calendar(config);
    let now = clock.now();
    let day = calendar.production_day(now);

    match cmd {
        ProductionCommand::Day { hour } => {
            let sampled_at = match hour {
                Some(h) => Some(calendar.sampled_at(h, day).ok_or_else(|| {
                    FloorError::InvalidArgument(format!("hour {h} is outside 0-23"))
                })?),
                None => None,
            };
            let key = calendar.key(sampled_at.unwrap_or(now));
            print_json(&json!({
                "production_day": calendar.production_day_id(now),
                "lot_code": lot_code(day),
                "best_by": best_by(day),
                "shift_date": key.shift_date,
                "shift_number": key.shift_number,
                "production_day_uuid": production_day_uuid(key.shift_date, key.shift_number),
                "sampled_at": sampled_at,
            }))
        }
        ProductionCommand::Label {
            template,
            lot_code: lot_override,
            best_by: best_by_override,
        } => {
            let mut ctx = LabelContext::for_day(day);
            if let Some(lot) = lot_override {
                ctx.lot_code = lot;
            }
            if let Some(bb) = best_by_override {
                ctx.best_by = bb;
            }
            let path = template.unwrap_or_else(|| config.storage.label_template_path());
            let html = LabelRenderer::new()
                .render_file(&path, &ctx)
                .with_context(|| format!("failed to render label from {}", path.display()))?;
            println!("{html}");
            Ok(())
        }
        ProductionCommand::Shift { schedule } => {
            let path = schedule.unwrap_or_else(|| config.storage.schedule_path());
            let monday = week_monday(now.date());
            let shift = match ShiftSchedule::load(&path) {
                Ok(schedule) => schedule.shift_for_week(monday).map(str::to_string),
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "failed to load shift schedule");
                    return Err(e).context("no shift schedule available");
                }
            };
            print_json(&json!({ "week_of": monday, "shift": shift }))
        }
    }
}
