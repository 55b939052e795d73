pub mod calendar;
pub mod cycle;
pub mod cycle_stats;
pub mod notes;
pub mod period;
