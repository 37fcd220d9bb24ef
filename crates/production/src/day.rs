//! Production day, lot code, best-by and sample timestamp arithmetic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Hour at which a new production day begins.
pub const DEFAULT_DAY_START_HOUR: u32 = 7;

/// Shift length used when splitting a production day into numbered shifts.
const SHIFT_HOURS: u32 = 12;

/// Identity of the shift a sample was taken in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionDayKey {
    pub shift_date: NaiveDate,
    /// 1 for the first twelve hours after the day start, 2 for the rest.
    pub shift_number: u32,
    pub lot_code: String,
}

/// Production calendar anchored at a day start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionCalendar {
    start_hour: u32,
}

impl ProductionCalendar {
    pub fn new(start_hour: u32) -> Self {
        Self {
            start_hour: start_hour.min(23),
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Production day containing `now`. Instants before the start hour
    /// belong to the previous calendar day.
    pub fn production_day(&self, now: NaiveDateTime) -> NaiveDate {
        let date = now.date();
        if now.hour() < self.start_hour {
            date.pred_opt().unwrap_or(date)
        } else {
            date
        }
    }

    /// `YYYY-MM-DD` of the production day containing `now`.
    pub fn production_day_id(&self, now: NaiveDateTime) -> String {
        self.production_day(now).format("%Y-%m-%d").to_string()
    }

    /// Timestamp for a sample taken at `hour` (0-23) during `day`. Hours
    /// before the start hour fall on the next calendar day. `None` for an
    /// hour outside 0-23.
    pub fn sampled_at(&self, hour: u32, day: NaiveDate) -> Option<NaiveDateTime> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
        let date = if hour < self.start_hour {
            day.succ_opt()?
        } else {
            day
        };
        Some(date.and_time(time))
    }

    /// Shift identity for a sample timestamp.
    pub fn key(&self, sampled_at: NaiveDateTime) -> ProductionDayKey {
        let shift_date = self.production_day(sampled_at);
        let offset = (sampled_at.hour() + 24 - self.start_hour) % 24;
        ProductionDayKey {
            shift_date,
            shift_number: if offset < SHIFT_HOURS { 1 } else { 2 },
            lot_code: lot_code(shift_date),
        }
    }
}

impl Default for ProductionCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_START_HOUR)
    }
}

/// `YYMMDD`.
pub fn lot_code(day: NaiveDate) -> String {
    day.format("%y%m%d").to_string()
}

/// `MM/YYYY`: same month, following year.
pub fn best_by(day: NaiveDate) -> String {
    format!("{:02}/{}", day.month(), day.year() + 1)
}

/// Monday of the week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn day_rolls_over_at_start_hour() {
        let cal = ProductionCalendar::default();
        assert_eq!(cal.production_day(at(2026, 2, 26, 6, 30)), date(2026, 2, 25));
        assert_eq!(cal.production_day(at(2026, 2, 26, 7, 0)), date(2026, 2, 26));
        assert_eq!(cal.production_day_id(at(2026, 3, 1, 0, 15)), "2026-02-28");
    }

    #[test]
    fn lot_code_and_best_by() {
        assert_eq!(lot_code(date(2026, 2, 26)), "260226");
        assert_eq!(best_by(date(2026, 2, 26)), "02/2027");
        assert_eq!(best_by(date(2025, 12, 31)), "12/2026");
    }

    #[test]
    fn early_hours_sample_next_calendar_day() {
        let cal = ProductionCalendar::default();
        let day = date(2026, 2, 25);
        assert_eq!(cal.sampled_at(3, day), Some(at(2026, 2, 26, 3, 0)));
        assert_eq!(cal.sampled_at(7, day), Some(at(2026, 2, 25, 7, 0)));
        assert_eq!(cal.sampled_at(23, day), Some(at(2026, 2, 25, 23, 0)));
        assert_eq!(cal.sampled_at(24, day), None);
    }

    #[test]
    fn custom_start_hour() {
        let cal = ProductionCalendar::new(6);
        assert_eq!(cal.production_day(at(2026, 2, 26, 6, 30)), date(2026, 2, 26));
    }

    #[test]
    fn shift_numbers_split_the_day() {
        let cal = ProductionCalendar::default();
        let day_shift = cal.key(at(2026, 2, 25, 18, 59));
        assert_eq!(day_shift.shift_number, 1);
        let night_shift = cal.key(at(2026, 2, 26, 2, 0));
        assert_eq!(night_shift.shift_number, 2);
        assert_eq!(night_shift.shift_date, date(2026, 2, 25));
        assert_eq!(night_shift.lot_code, "260225");
    }

    #[test]
    fn week_monday_handles_sunday() {
        // 2026-03-01 is a Sunday.
        assert_eq!(week_monday(date(2026, 3, 1)), date(2026, 2, 23));
        assert_eq!(week_monday(date(2026, 2, 23)), date(2026, 2, 23));
    }
}
