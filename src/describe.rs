use crate::{
    field::{FieldKind, FieldValue},
    schedule::CronSchedule,
    utils::{self, Number},
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Well-known expression with a short label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preset {
    /// Short human-readable label.
    pub label: &'static str,
    /// Cron expression.
    pub expression: &'static str,
}

/// Expressions offered for a quick start.
pub const PRESETS: [Preset; 4] = [
    Preset {
        label: "Every 5 minutes",
        expression: "*/5 * * * *",
    },
    Preset {
        label: "Weekdays at 9am",
        expression: "0 9 * * 1-5",
    },
    Preset {
        label: "1st of month midnight",
        expression: "0 0 1 * *",
    },
    Preset {
        label: "Sundays at 6:30am",
        expression: "30 6 * * 0",
    },
];

/// Field of a parsed schedule together with its description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSummary {
    /// Field.
    pub kind: FieldKind,
    /// Text of the field as it was written.
    pub raw: String,
    /// Human-readable meaning, see [`describe`].
    pub meaning: String,
}

impl CronSchedule {
    /// Returns per-field descriptions in the expression order.
    pub fn summary(&self) -> Vec<FieldSummary> {
        self.fields()
            .into_iter()
            .map(|field| FieldSummary {
                kind: field.kind(),
                raw: field.raw().to_owned(),
                meaning: if field.is_full() {
                    describe(field.kind(), "*")
                } else {
                    describe(field.kind(), field.raw())
                },
            })
            .collect()
    }
}

/// Returns short English description of the field text, like `Every 5 minutes` for `*/5`.
///
/// Cosmetic only: forms without a description are returned as is.
pub fn describe(kind: FieldKind, input: &str) -> String {
    let name = kind.name();

    if input == "*" {
        return format!("Every {name}");
    }

    if let Some(step) = input.strip_prefix("*/") {
        return match number(step) {
            Some(step) if step > 0 => format!("Every {step} {name}s"),
            _ => input.to_owned(),
        };
    }

    if !input.contains(',') {
        if let Some((start, end)) = input.split_once('-') {
            return describe_range(kind, start, end).unwrap_or_else(|| input.to_owned());
        }
    } else {
        let names = input
            .split(',')
            .map(|value| value_name(kind, value))
            .collect::<Option<Vec<_>>>();

        return match (kind, names) {
            (FieldKind::Month | FieldKind::DayOfWeek, Some(names)) => names.join(", "),
            (FieldKind::Month | FieldKind::DayOfWeek, None) => input.to_owned(),
            _ => format!("At {name}s: {input}"),
        };
    }

    match (kind, number(input)) {
        (_, None) => input.to_owned(),
        (FieldKind::DayOfWeek | FieldKind::Month, Some(_)) => match value_name(kind, input) {
            Some(day) if kind == FieldKind::DayOfWeek => format!("On {day}"),
            Some(month) => format!("In {month}"),
            None => input.to_owned(),
        },
        (FieldKind::Hour, Some(hour)) => {
            let period = if hour < 12 { "AM" } else { "PM" };
            let hour = match hour % 12 {
                0 => 12,
                hour => hour,
            };
            format!("At {hour}:00 {period}")
        }
        (FieldKind::Minute, Some(minute)) => format!("At minute {minute}"),
        (FieldKind::DayOfMonth, Some(day)) => format!("On {name} {day}"),
    }
}

fn describe_range(kind: FieldKind, start: &str, end: &str) -> Option<String> {
    match kind {
        FieldKind::DayOfWeek | FieldKind::Month => Some(format!(
            "{} through {}",
            value_name(kind, start)?,
            value_name(kind, end)?
        )),
        FieldKind::DayOfMonth => Some(format!("Day {} through day {}", number(start)?, number(end)?)),
        FieldKind::Minute | FieldKind::Hour => Some(format!("{} {} through {}", kind.name(), number(start)?, number(end)?)),
    }
}

/// Name of the month or weekday, the number itself for other fields.
fn value_name(kind: FieldKind, input: &str) -> Option<String> {
    let value = usize::from(number(input)?);
    match kind {
        FieldKind::Month => MONTH_NAMES.get(value.checked_sub(1)?).map(|name| name.to_string()),
        FieldKind::DayOfWeek => DAY_NAMES.get(value).map(|name| name.to_string()),
        FieldKind::Minute | FieldKind::Hour | FieldKind::DayOfMonth => Some(value.to_string()),
    }
}

fn number(input: &str) -> Option<FieldValue> {
    match utils::parse_number(input) {
        Number::Value(value) => Some(value),
        Number::Overflow | Number::NotNumber => None,
    }
}
