use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::dates::dates_in_range;
use crate::models::{DayNote, PeriodRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayMarking {
    pub period: bool,
    pub starting_day: bool,
    pub ending_day: bool,
    pub active: bool,
    pub disabled: bool,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<DayNote>,
}

/// Builds the calendar overlay for the given records.
///
/// An open period is drawn through `today`, so the result must be rebuilt
/// whenever the date changes. Touching or overlapping records form a single
/// run with one start and one end boundary.
pub fn project(
    records: &[PeriodRecord],
    notes: &BTreeMap<NaiveDate, DayNote>,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, DayMarking> {
    let mut marked: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut active: BTreeSet<NaiveDate> = BTreeSet::new();

    for record in records {
        for date in dates_in_range(record.start_date, record.covered_until(today)) {
            marked.insert(date);
            if record.is_active() {
                active.insert(date);
            }
        }
    }

    let mut markings: BTreeMap<NaiveDate, DayMarking> = BTreeMap::new();
    let mut prev: Option<NaiveDate> = None;

    for &date in &marked {
        let gap = prev.map(|p| date.signed_duration_since(p).num_days());
        let starts_run = gap != Some(1);

        if starts_run {
            if let Some(p) = prev {
                if let Some(m) = markings.get_mut(&p) {
                    m.ending_day = true;
                }
            }
        }

        markings.insert(
            date,
            DayMarking {
                period: true,
                starting_day: starts_run,
                active: active.contains(&date),
                disabled: true,
                ..Default::default()
            },
        );
        prev = Some(date);
    }

    if let Some(last) = prev {
        if let Some(m) = markings.get_mut(&last) {
            m.ending_day = true;
        }
    }

    for (date, note) in notes {
        markings.entry(*date).or_default().note = Some(note.clone());
    }

    if let Some(date) = selected {
        markings.entry(date).or_default().selected = true;
    }

    markings
}
