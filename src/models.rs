use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl PeriodRecord {
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// Last day covered by the record; an open period runs through `today`.
    pub fn covered_until(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(today)
    }

    pub fn covers(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.start_date <= date && date <= self.covered_until(today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNote {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub mood: String,
}

impl DayNote {
    pub fn is_empty(&self) -> bool {
        self.notes.trim().is_empty() && self.mood.trim().is_empty()
    }
}

/// Everything persisted for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleData {
    #[serde(default)]
    pub periods: Vec<PeriodRecord>,
    #[serde(default)]
    pub notes: BTreeMap<NaiveDate, DayNote>,
    #[serde(default)]
    pub alerts_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LogPeriodRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LockQuery {
    pub user_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct LockStatus {
    pub date: NaiveDate,
    pub locked: bool,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub user_id: Uuid,
    pub selected: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AlertsRequest {
    pub user_id: Uuid,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AlertsStatus {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct DayNoteRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDayNoteRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct DayNoteEntry {
    pub date: NaiveDate,
    pub notes: String,
    pub mood: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_data_round_trips_with_camel_case_keys() {
        let data = CycleData {
            periods: vec![PeriodRecord {
                id: Uuid::nil(),
                start_date: NaiveDate::from_ymd_opt(2025, 8, 16).unwrap(),
                end_date: None,
            }],
            notes: BTreeMap::new(),
            alerts_enabled: true,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["periods"][0]["startDate"], "2025-08-16");
        assert!(json["periods"][0]["endDate"].is_null());
        assert_eq!(json["alertsEnabled"], true);
    }

    #[test]
    fn missing_fields_default() {
        let data: CycleData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, CycleData::default());
    }
}
