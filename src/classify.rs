use serde::{Deserialize, Serialize};

use crate::stats::CycleStatistics;

/// Largest tolerated gap, in days, between the last cycle and the average.
pub const MAX_CYCLE_DEVIATION_DAYS: i64 = 8;
pub const TYPICAL_CYCLE_MIN_DAYS: i64 = 21;
pub const TYPICAL_CYCLE_MAX_DAYS: i64 = 35;

pub const NOT_ENOUGH_DATA_MESSAGE: &str = "Log at least two full cycles for an analysis.";
pub const REGULAR_MESSAGE: &str = "Your cycle lengths appear to be consistent.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub max_deviation_days: i64,
    pub typical_min_days: i64,
    pub typical_max_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_deviation_days: MAX_CYCLE_DEVIATION_DAYS,
            typical_min_days: TYPICAL_CYCLE_MIN_DAYS,
            typical_max_days: TYPICAL_CYCLE_MAX_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IrregularReason {
    Deviation { days: i64 },
    OutOfRange { average: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IrregularityStatus {
    NotEnoughData {
        message: String,
    },
    Regular {
        message: String,
    },
    Irregular {
        reason: IrregularReason,
        message: String,
    },
}

impl IrregularityStatus {
    pub fn message(&self) -> &str {
        match self {
            IrregularityStatus::NotEnoughData { message }
            | IrregularityStatus::Regular { message }
            | IrregularityStatus::Irregular { message, .. } => message.as_str(),
        }
    }

    pub fn is_irregular(&self) -> bool {
        matches!(self, IrregularityStatus::Irregular { .. })
    }
}

/// First matching rule wins: not enough data, deviation from the personal
/// average, average outside the typical range, otherwise regular.
pub fn classify(stats: &CycleStatistics, thresholds: &Thresholds) -> IrregularityStatus {
    let (avg, last) = match (stats.avg_cycle_length, stats.last_cycle_length) {
        (Some(avg), Some(last)) if stats.has_enough_cycles() => (avg, last),
        _ => {
            return IrregularityStatus::NotEnoughData {
                message: NOT_ENOUGH_DATA_MESSAGE.to_string(),
            }
        }
    };

    let deviation = (last - avg).abs();
    if deviation > thresholds.max_deviation_days {
        return IrregularityStatus::Irregular {
            reason: IrregularReason::Deviation { days: deviation },
            message: format!(
                "Your last cycle differed from your average by {} days.",
                deviation
            ),
        };
    }

    if avg < thresholds.typical_min_days || avg > thresholds.typical_max_days {
        return IrregularityStatus::Irregular {
            reason: IrregularReason::OutOfRange { average: avg },
            message: format!(
                "Your average cycle of {} days is outside the typical {}-{} day range.",
                avg, thresholds.typical_min_days, thresholds.typical_max_days
            ),
        };
    }

    IrregularityStatus::Regular {
        message: REGULAR_MESSAGE.to_string(),
    }
}
