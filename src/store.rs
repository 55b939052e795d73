use chrono::NaiveDate;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::CycleError;
use crate::models::{CycleData, DayNote, PeriodRecord};

/// Owner of one user's period records and day notes.
///
/// Mutators validate fully before touching state, so a rejected call leaves
/// the store exactly as it was. At most one record is ever active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodStore {
    data: CycleData,
}

impl PeriodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts persisted data only if it already satisfies the store's
    /// invariants: every closed record ends on or after its start and at most
    /// one record is open.
    pub fn from_data(data: CycleData) -> Result<Self, CycleError> {
        for record in &data.periods {
            if let Some(end) = record.end_date {
                if end < record.start_date {
                    return Err(CycleError::InvalidDateOrder {
                        start: record.start_date,
                        end,
                    });
                }
            }
        }
        if data.periods.iter().filter(|r| r.is_active()).count() > 1 {
            return Err(CycleError::ActivePeriodConflict);
        }

        Ok(Self { data })
    }

    pub fn data(&self) -> &CycleData {
        &self.data
    }

    pub fn records(&self) -> &[PeriodRecord] {
        &self.data.periods
    }

    pub fn active_period(&self) -> Option<&PeriodRecord> {
        self.data.periods.iter().find(|r| r.is_active())
    }

    pub fn is_date_locked(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.data.periods.iter().any(|r| r.covers(date, today))
    }

    pub fn log_period_start(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<&PeriodRecord, CycleError> {
        if self.active_period().is_some() {
            return Err(CycleError::ActivePeriodConflict);
        }
        if date > today {
            return Err(CycleError::FutureDate(date));
        }
        if self.is_date_locked(date, today) {
            return Err(CycleError::DateAlreadyLocked(date));
        }

        self.data.periods.push(PeriodRecord {
            id: Uuid::new_v4(),
            start_date: date,
            end_date: None,
        });
        Ok(&self.data.periods[self.data.periods.len() - 1])
    }

    pub fn log_period_end(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<&PeriodRecord, CycleError> {
        let idx = self
            .data
            .periods
            .iter()
            .position(|r| r.is_active())
            .ok_or(CycleError::NoActivePeriod)?;
        let start = self.data.periods[idx].start_date;

        if date < start {
            return Err(CycleError::InvalidDateOrder { start, end: date });
        }
        if date > today {
            return Err(CycleError::FutureDate(date));
        }
        // closing must not swallow a record logged later in the calendar
        let overlaps = self
            .data
            .periods
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .find(|(_, r)| r.start_date <= date && start <= r.covered_until(today));
        if let Some((_, other)) = overlaps {
            return Err(CycleError::DateAlreadyLocked(other.start_date.max(start)));
        }

        let record = &mut self.data.periods[idx];
        record.end_date = Some(date);
        Ok(record)
    }

    pub fn note(&self, date: NaiveDate) -> Option<&DayNote> {
        self.data.notes.get(&date)
    }

    pub fn notes(&self) -> &BTreeMap<NaiveDate, DayNote> {
        &self.data.notes
    }

    /// Stores the note for `date`; an empty note clears the entry.
    pub fn set_note(&mut self, date: NaiveDate, note: DayNote) {
        if note.is_empty() {
            self.data.notes.remove(&date);
        } else {
            self.data.notes.insert(date, note);
        }
    }

    pub fn remove_note(&mut self, date: NaiveDate) -> Option<DayNote> {
        self.data.notes.remove(&date)
    }

    pub fn alerts_enabled(&self) -> bool {
        self.data.alerts_enabled
    }

    pub fn set_alerts_enabled(&mut self, enabled: bool) {
        self.data.alerts_enabled = enabled;
    }
}
