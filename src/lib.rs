//! Five-field cron expression parser and upcoming runs projector.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to:
//! - parse and validate classic five-field cron expressions;
//! - project the next few moments which satisfy the expression, starting from a caller supplied instant.
//!
//! _This is not a cron jobs scheduler or runner._ It never reads the system clock:
//! "now" is always provided by the caller, so every result is reproducible.
//!
//! ## Cron expression format
//!
//! Expression consists of exactly five whitespace-separated fields:
//!
//! | Field        | Allowed values  | Allowed special characters |
//! |--------------|-----------------|----------------------------|
//! | Minutes      | 0-59            | * , - /                    |
//! | Hours        | 0-23            | * , - /                    |
//! | Day of Month | 1-31            | * , - /                    |
//! | Month        | 1-12            | * , - /                    |
//! | Day of Week  | 0-6 (0 is SUN)  | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values or patterns, i.e. `1,7,12`;
//! - `-` - range of values, i.e. `0-15`;
//! - `/` - repeating values over the whole field or over a range, i.e. `*/12`, `30-59/2`.
//!
//! Seconds, years, mnemonic names, `?`, `L`, `W`, `#` and `@` aliases aren't supported.
//!
//! A moment matches the expression if **all five** fields match.
//! Note that day of month and day of week are combined with AND even if both are restricted,
//! so `0 0 13 * 5` means "midnight of every Friday the 13th".
//!
//! ## How to use
//!
//! - [parse_expression()](parse_expression) (or [CronSchedule::new()](CronSchedule::new)) parses and validates an expression;
//! - [project()](project) (or [CronSchedule::project()](CronSchedule::project)) returns the next occurrences;
//! - [CronSchedule::iter()](CronSchedule::iter) returns an `Iterator` of occurrences, limited by a horizon.
//!
//! ### Example with `project`
//! ```rust
//! use chrono::NaiveDateTime;
//! use cron_preview::{parse_expression, project, Result, ScheduleQuery};
//!
//! fn weekdays() -> Result<()> {
//!     let schedule = parse_expression("0 9 * * 1-5")?;
//!     let saturday: NaiveDateTime = "2024-01-06T10:00:00".parse().unwrap();
//!
//!     let result = project(&ScheduleQuery::new(schedule, saturday).with_count(3));
//!     assert!(!result.horizon_exceeded);
//!     assert_eq!(result.occurrences[0].to_string(), "2024-01-08 09:00");
//!
//!     Ok(())
//! }
//! # weekdays().unwrap();
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use chrono::{NaiveDateTime, TimeDelta};
//! use cron_preview::{CronSchedule, Result};
//!
//! fn iterator() -> Result<()> {
//!     let schedule = CronSchedule::new("*/15 * * * *")?;
//!     let now: NaiveDateTime = "2024-01-01T00:02:00".parse().unwrap();
//!
//!     // All occurrences within the next hour
//!     schedule.iter(&now, TimeDelta::hours(1)).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # iterator().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`CronSchedule`], [`Occurrence`] and [`ProjectionResult`].

/// Human-readable field descriptions and preset expressions.
pub mod describe;
/// Crate specific Error implementation.
pub mod error;
/// Single field parser.
pub mod field;
/// Projection of upcoming occurrences.
pub mod projection;
/// Cron expression parser and occurrences iterator.
pub mod schedule;
mod series;
mod utils;

// Re-export of public entities.
pub use describe::{describe, FieldSummary, Preset, PRESETS};
pub use error::ParseError;
pub use field::{parse_field, FieldKind, FieldSpec, FieldValue, FieldValueSet};
pub use projection::{default_horizon, project, Occurrence, ProjectionResult, ScheduleQuery};
pub use schedule::{parse_expression, CronSchedule, Occurrences};

/// Convenient alias for `Result`.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
