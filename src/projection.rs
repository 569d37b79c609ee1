use crate::schedule::CronSchedule;
use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike, Weekday};
use std::fmt::Display;

/// Number of occurrences [`ScheduleQuery::new`] asks for by default.
pub const DEFAULT_COUNT: usize = 5;

/// Number of days [`default_horizon`] spans, long enough for any calendar year including leap ones.
pub const DEFAULT_HORIZON_DAYS: i64 = 366;

/// Default span of simulated time to scan: one calendar year.
#[inline]
pub fn default_horizon() -> TimeDelta {
    TimeDelta::days(DEFAULT_HORIZON_DAYS)
}

/// Single point in time, with minute resolution, which satisfies all fields of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence(NaiveDateTime);

impl Occurrence {
    /// Caller is responsible to ensure that `instant` is aligned to the start of a minute.
    #[inline]
    pub(crate) fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, `1-12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, `1-31`.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour, `0-23`.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute, `0-59`.
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Day of week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Occurrence as a timestamp, seconds are always zero.
    pub fn as_datetime(&self) -> &NaiveDateTime {
        &self.0
    }
}

impl From<Occurrence> for NaiveDateTime {
    fn from(value: Occurrence) -> Self {
        value.0
    }
}

impl Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute()
        )
    }
}

/// Outcome of a projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionResult {
    /// Found occurrences in chronological order, no more than requested.
    pub occurrences: Vec<Occurrence>,
    /// `true` if the horizon ran out before the requested number of occurrences was found.
    pub horizon_exceeded: bool,
}

/// Input of the [`project`] function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleQuery {
    /// Schedule to project.
    pub schedule: CronSchedule,
    /// Caller supplied "now", occurrences are strictly after it.
    pub reference_instant: NaiveDateTime,
    /// Maximum number of occurrences to collect.
    pub desired_count: usize,
    /// Maximum span of simulated time after `reference_instant` to scan.
    pub horizon: TimeDelta,
}

impl ScheduleQuery {
    /// Constructs query for [`DEFAULT_COUNT`] occurrences within the [`default_horizon`].
    pub fn new(schedule: CronSchedule, reference_instant: NaiveDateTime) -> Self {
        Self {
            schedule,
            reference_instant,
            desired_count: DEFAULT_COUNT,
            horizon: default_horizon(),
        }
    }

    /// Overrides number of occurrences to collect.
    pub fn with_count(self, desired_count: usize) -> Self {
        Self { desired_count, ..self }
    }

    /// Overrides span of time to scan.
    pub fn with_horizon(self, horizon: TimeDelta) -> Self {
        Self { horizon, ..self }
    }
}

/// Returns the first `desired_count` occurrences of the query's schedule after the reference instant.
///
/// Never fails: if the horizon is exhausted first, whatever was found is returned with `horizon_exceeded` set.
/// Running time depends on the query only, the wall clock is never consulted.
#[inline]
pub fn project(query: &ScheduleQuery) -> ProjectionResult {
    query
        .schedule
        .project(&query.reference_instant, query.desired_count, query.horizon)
}
