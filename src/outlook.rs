use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::PeriodRecord;
use crate::stats::CycleStatistics;

/// Used for predictions until two full cycles are logged.
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;
/// Fertile window, in days after the period start.
pub const FERTILE_WINDOW_START: i64 = 12;
pub const FERTILE_WINDOW_END: i64 = 16;

pub const NO_PREDICTION_MESSAGE: &str = "Log your periods to get a prediction.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleOutlook {
    pub start_date: NaiveDate,
    pub cycle_day: i64,
    pub cycle_length_used: i64,
    pub in_fertile_window: bool,
    pub next_period_start: NaiveDate,
    pub period_expected_in_days: i64,
    pub message: String,
}

/// Where `today` sits in the current cycle. `None` until something is logged.
pub fn outlook(
    records: &[PeriodRecord],
    stats: &CycleStatistics,
    today: NaiveDate,
) -> Option<CycleOutlook> {
    let latest = records.iter().max_by_key(|r| r.start_date)?;
    let start = latest.start_date;
    let cycle_length_used = stats.avg_cycle_length.unwrap_or(DEFAULT_CYCLE_LENGTH_DAYS);

    let next_period_start = add_days(start, cycle_length_used)?;
    let fertile = add_days(start, FERTILE_WINDOW_START)?..=add_days(start, FERTILE_WINDOW_END)?;

    Some(CycleOutlook {
        start_date: start,
        cycle_day: (today - start).num_days() + 1,
        cycle_length_used,
        in_fertile_window: fertile.contains(&today),
        next_period_start,
        period_expected_in_days: (next_period_start - today).num_days(),
        message: format!(
            "Your next cycle may start around {}",
            next_period_start.format("%a %b %d %Y")
        ),
    })
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::try_from(days).ok()?))
}
