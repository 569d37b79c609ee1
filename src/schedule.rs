use crate::{
    field::{FieldKind, FieldValue, FieldValueSet},
    projection::{self, Occurrence, ProjectionResult},
    ParseError, Result,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use std::{fmt::Display, iter::FusedIterator, str::FromStr};
use tracing::{debug, trace};

/// Parses and validates five-field cron expression, see [`CronSchedule::new`].
#[inline]
pub fn parse_expression(expression: &str) -> Result<CronSchedule> {
    CronSchedule::new(expression)
}

/// Represents a parsed cron expression: one value set per field.
///
/// For expression format and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct CronSchedule {
    minute: FieldValueSet,
    hour: FieldValueSet,
    dom: FieldValueSet,
    month: FieldValueSet,
    dow: FieldValueSet,
}

impl CronSchedule {
    /// Parses and validates provided `expression` and constructs [`CronSchedule`] instance.
    ///
    /// Alternative way to construct [`CronSchedule`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`ParseError`] of the first failed field if expression is unparsable,
    /// or [`ParseError::WrongFieldCount`] if it doesn't consist of exactly five fields.
    pub fn new(expression: impl AsRef<str>) -> Result<Self> {
        let elements: Vec<&str> = expression.as_ref().split_whitespace().collect();
        let [minute, hour, dom, month, dow] = elements.as_slice() else {
            return Err(ParseError::WrongFieldCount { found: elements.len() });
        };

        let schedule = Self {
            minute: FieldKind::Minute.parse(minute)?,
            hour: FieldKind::Hour.parse(hour)?,
            dom: FieldKind::DayOfMonth.parse(dom)?,
            month: FieldKind::Month.parse(month)?,
            dow: FieldKind::DayOfWeek.parse(dow)?,
        };
        trace!(%schedule, "cron expression parsed");

        Ok(schedule)
    }

    /// Returns parsed values of the particular field.
    pub fn field(&self, kind: FieldKind) -> &FieldValueSet {
        match kind {
            FieldKind::Minute => &self.minute,
            FieldKind::Hour => &self.hour,
            FieldKind::DayOfMonth => &self.dom,
            FieldKind::Month => &self.month,
            FieldKind::DayOfWeek => &self.dow,
        }
    }

    /// Returns all fields in the expression order.
    pub fn fields(&self) -> [&FieldValueSet; 5] {
        FieldKind::ALL.map(|kind| self.field(kind))
    }

    /// Returns `true` if `instant` satisfies every field of the schedule.
    ///
    /// Day of month and day of week are both required to match, even if both are restricted.
    #[inline]
    pub fn matches(&self, instant: &NaiveDateTime) -> bool {
        self.matches_date(&instant.date())
            && self.hour.contains(instant.hour() as FieldValue)
            && self.minute.contains(instant.minute() as FieldValue)
    }

    #[inline]
    fn matches_date(&self, date: &NaiveDate) -> bool {
        self.month.contains(date.month() as FieldValue)
            && self.dom.contains(date.day() as FieldValue)
            && self.dow.contains(date.weekday().num_days_from_sunday() as FieldValue)
    }

    /// Returns iterator of occurrences strictly after `reference`, in chronological order.
    ///
    /// Iterator ends as soon as the next candidate minute is later than `reference + horizon`.
    #[inline]
    pub fn iter(&self, reference: &NaiveDateTime, horizon: TimeDelta) -> Occurrences<'_> {
        Occurrences::new(self, reference, horizon)
    }

    /// Returns the first occurrence after `reference` within the [default horizon](projection::default_horizon).
    ///
    /// Returns `None` if there is no such occurrence.
    pub fn upcoming(&self, reference: &NaiveDateTime) -> Option<Occurrence> {
        self.iter(reference, projection::default_horizon()).next()
    }

    /// Collects up to `desired_count` occurrences after `reference` within `horizon`.
    ///
    /// Unsatisfiable schedule isn't an error: result has fewer occurrences and `horizon_exceeded` flag set.
    pub fn project(&self, reference: &NaiveDateTime, desired_count: usize, horizon: TimeDelta) -> ProjectionResult {
        let occurrences: Vec<Occurrence> = self.iter(reference, horizon).take(desired_count).collect();
        let horizon_exceeded = occurrences.len() < desired_count;

        debug!(
            schedule = %self,
            %reference,
            desired_count,
            found = occurrences.len(),
            horizon_exceeded,
            "projection finished"
        );

        ProjectionResult {
            occurrences,
            horizon_exceeded,
        }
    }
}

/// Contains iterator state.
///
/// Scans minute by minute, but jumps over the whole day if the date doesn't match,
/// and over the whole hour if the hour doesn't match.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    schedule: &'a CronSchedule,
    next: Option<NaiveDateTime>,
    limit: NaiveDateTime,
}

impl<'a> Occurrences<'a> {
    fn new(schedule: &'a CronSchedule, reference: &NaiveDateTime, horizon: TimeDelta) -> Self {
        // The reference minute itself is never reported.
        let next = reference
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .and_then(|t| t.checked_add_signed(TimeDelta::minutes(1)));

        let limit = reference.checked_add_signed(horizon).unwrap_or(if horizon < TimeDelta::zero() {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        });

        Self { schedule, next, limit }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next.filter(|current| *current <= self.limit)?;
            let date = current.date();

            self.next = if !self.schedule.matches_date(&date) {
                date.succ_opt().and_then(|date| date.and_hms_opt(0, 0, 0))
            } else if !self.schedule.hour.contains(current.hour() as FieldValue) {
                current
                    .with_minute(0)
                    .and_then(|t| t.checked_add_signed(TimeDelta::hours(1)))
            } else {
                let next = current.checked_add_signed(TimeDelta::minutes(1));
                if self.schedule.minute.contains(current.minute() as FieldValue) {
                    self.next = next;
                    return Some(Occurrence::new(current));
                }
                next
            };
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

impl From<CronSchedule> for String {
    fn from(value: CronSchedule) -> Self {
        value.to_string()
    }
}

impl From<&CronSchedule> for String {
    fn from(value: &CronSchedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CronSchedule {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for CronSchedule {
    type Error = ParseError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CronSchedule {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for CronSchedule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for CronSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {} {}", self.minute, self.hour, self.dom, self.month, self.dow)
    }
}
