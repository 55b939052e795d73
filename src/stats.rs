use serde::Serialize;

use crate::dates::{days_between, inclusive_days};
use crate::models::PeriodRecord;

/// Statistics derived from the completed periods. Always rebuilt from the
/// record list, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleStatistics {
    pub completed_periods: Vec<PeriodRecord>,
    pub period_durations: Vec<i64>,
    pub cycle_lengths: Vec<i64>,
    pub avg_period_duration: i64,
    pub avg_cycle_length: Option<i64>,
    pub last_cycle_length: Option<i64>,
}

impl CycleStatistics {
    pub fn compute(records: &[PeriodRecord]) -> Self {
        let mut completed: Vec<PeriodRecord> = records
            .iter()
            .filter(|r| r.end_date.is_some())
            .cloned()
            .collect();
        completed.sort_by_key(|r| r.start_date);

        let period_durations: Vec<i64> = completed
            .iter()
            .filter_map(|r| r.end_date.map(|end| inclusive_days(r.start_date, end)))
            .collect();
        let avg_period_duration = rounded_mean(&period_durations).unwrap_or(0);

        let cycle_lengths: Vec<i64> = completed
            .windows(2)
            .map(|pair| days_between(pair[1].start_date, pair[0].start_date))
            .collect();

        Self {
            avg_cycle_length: rounded_mean(&cycle_lengths),
            last_cycle_length: cycle_lengths.last().copied(),
            completed_periods: completed,
            period_durations,
            cycle_lengths,
            avg_period_duration,
        }
    }

    pub fn has_enough_cycles(&self) -> bool {
        self.completed_periods.len() >= 2
    }
}

/// Mean rounded half up, in integer arithmetic: 29.5 -> 30, 29.4 -> 29.
/// Inputs are day counts, so never negative.
pub fn rounded_mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as i64;
    let sum: i64 = values.iter().sum();
    Some((2 * sum + n).div_euclid(2 * n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn period(start: &str, end: Option<&str>) -> PeriodRecord {
        PeriodRecord {
            id: Uuid::new_v4(),
            start_date: d(start),
            end_date: end.map(d),
        }
    }

    #[test]
    fn three_five_day_periods() {
        // logged out of order on purpose
        let records = vec![
            period("2025-09-15", Some("2025-09-19")),
            period("2025-10-14", Some("2025-10-18")),
            period("2025-08-16", Some("2025-08-20")),
        ];
        let stats = CycleStatistics::compute(&records);

        assert_eq!(stats.completed_periods[0].start_date, d("2025-08-16"));
        assert_eq!(stats.period_durations, vec![5, 5, 5]);
        assert_eq!(stats.avg_period_duration, 5);
        assert_eq!(stats.cycle_lengths, vec![30, 29]);
        // 29.5 rounds up
        assert_eq!(stats.avg_cycle_length, Some(30));
        assert_eq!(stats.last_cycle_length, Some(29));
    }

    #[test]
    fn active_period_is_ignored() {
        let records = vec![
            period("2025-08-16", Some("2025-08-20")),
            period("2025-09-15", None),
        ];
        let stats = CycleStatistics::compute(&records);
        assert_eq!(stats.completed_periods.len(), 1);
        assert_eq!(stats.avg_period_duration, 5);
        assert!(stats.cycle_lengths.is_empty());
        assert_eq!(stats.avg_cycle_length, None);
        assert_eq!(stats.last_cycle_length, None);
        assert!(!stats.has_enough_cycles());
    }

    #[test]
    fn empty_store_has_zero_duration() {
        let stats = CycleStatistics::compute(&[]);
        assert_eq!(stats, CycleStatistics::default());
        assert_eq!(stats.avg_period_duration, 0);
    }

    #[test]
    fn half_values_round_up() {
        assert_eq!(rounded_mean(&[29, 30]), Some(30));
        assert_eq!(rounded_mean(&[30, 31]), Some(31));
        assert_eq!(rounded_mean(&[4, 5]), Some(5));
    }

    #[test]
    fn below_half_rounds_down() {
        // 29.4
        assert_eq!(rounded_mean(&[29, 29, 29, 30, 30]), Some(29));
        // 29.6
        assert_eq!(rounded_mean(&[29, 29, 30, 30, 30]), Some(30));
        // 29.333..
        assert_eq!(rounded_mean(&[29, 29, 30]), Some(29));
        assert_eq!(rounded_mean(&[]), None);
    }

    #[test]
    fn single_day_period_lasts_one_day() {
        let stats = CycleStatistics::compute(&[period("2025-08-16", Some("2025-08-16"))]);
        assert_eq!(stats.period_durations, vec![1]);
    }
}
