use chrono::{Days, NaiveDate};
use std::iter::FusedIterator;

/// Inclusive, ascending run of calendar dates. Clones iterate independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        next: (start <= end).then_some(start),
        last: end,
    }
}

/// Absolute number of days between two dates. Order does not matter.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Day count of `[start, end]`, both ends included.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.last {
            current.checked_add_days(Days::new(1))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for DateRange {
    fn next_back(&mut self) -> Option<NaiveDate> {
        let first = self.next?;
        let current = self.last;
        if current > first {
            match current.checked_sub_days(Days::new(1)) {
                Some(prev) => self.last = prev,
                None => self.next = None,
            }
        } else {
            self.next = None;
        }
        Some(current)
    }
}

impl ExactSizeIterator for DateRange {
    fn len(&self) -> usize {
        match self.next {
            Some(first) => inclusive_days(first, self.last) as usize,
            None => 0,
        }
    }
}

impl FusedIterator for DateRange {}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_day_range_yields_that_day() {
        let days: Vec<_> = dates_in_range(d("2025-08-16"), d("2025-08-16")).collect();
        assert_eq!(days, vec![d("2025-08-16")]);
    }

    #[test]
    fn range_crosses_month_and_leap_day() {
        let days: Vec<_> = dates_in_range(d("2024-02-27"), d("2024-03-02")).collect();
        assert_eq!(
            days,
            vec![
                d("2024-02-27"),
                d("2024-02-28"),
                d("2024-02-29"),
                d("2024-03-01"),
                d("2024-03-02"),
            ]
        );
    }

    #[test]
    fn range_across_dst_switch_has_no_gaps() {
        // Europe and US both shift clocks in this window
        let range = dates_in_range(d("2025-03-08"), d("2025-03-31"));
        assert_eq!(range.len(), 24);
        assert_eq!(range.clone().last(), Some(d("2025-03-31")));
        assert_eq!(days_between(d("2025-03-08"), d("2025-03-31")), 23);
    }

    #[test]
    fn reversed_bounds_are_empty() {
        let mut range = dates_in_range(d("2025-09-10"), d("2025-09-01"));
        assert_eq!(range.len(), 0);
        assert_eq!(range.next(), None);
    }

    #[test]
    fn range_is_restartable_and_reversible() {
        let range = dates_in_range(d("2025-10-14"), d("2025-10-18"));
        let forward: Vec<_> = range.clone().collect();
        let mut backward: Vec<_> = range.clone().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(range.count(), 5);
    }

    #[test]
    fn mixed_ends_meet_in_the_middle() {
        let mut range = dates_in_range(d("2025-01-01"), d("2025-01-03"));
        assert_eq!(range.next(), Some(d("2025-01-01")));
        assert_eq!(range.next_back(), Some(d("2025-01-03")));
        assert_eq!(range.next(), Some(d("2025-01-02")));
        assert_eq!(range.next_back(), None);
        assert_eq!(range.next(), None);
    }

    #[test]
    fn days_between_is_commutative() {
        let pairs = [
            ("2025-08-16", "2025-09-15"),
            ("2025-09-15", "2025-10-14"),
            ("2023-12-31", "2024-03-01"),
            ("2025-05-05", "2025-05-05"),
        ];
        for (a, b) in pairs {
            assert_eq!(days_between(d(a), d(b)), days_between(d(b), d(a)));
        }
        assert_eq!(days_between(d("2025-09-15"), d("2025-08-16")), 30);
        assert_eq!(days_between(d("2025-05-05"), d("2025-05-05")), 0);
    }

    #[test]
    fn inclusive_days_counts_both_ends() {
        assert_eq!(inclusive_days(d("2025-08-16"), d("2025-08-20")), 5);
        assert_eq!(inclusive_days(d("2025-08-16"), d("2025-08-16")), 1);
    }
}
