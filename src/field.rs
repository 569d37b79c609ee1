use crate::{
    series::SeriesWithStep,
    utils::{self, Number},
    ParseError, Result,
};
use std::{collections::BTreeSet, fmt::Display};

/// Type of a single field value, wide enough for every field's bounds.
pub type FieldValue = u8;

/// Positional component of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Minute of the hour, `0-59`.
    Minute,
    /// Hour of the day, `0-23`.
    Hour,
    /// Day of the month, `1-31`.
    DayOfMonth,
    /// Month of the year, `1-12`.
    Month,
    /// Day of the week, `0-6`, Sunday is `0`.
    DayOfWeek,
}

impl FieldKind {
    /// All fields in the order they appear in an expression.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    /// Returns the field's static bounds.
    pub const fn spec(self) -> FieldSpec {
        let (minimum, maximum) = match self {
            FieldKind::Minute => (0, 59),
            FieldKind::Hour => (0, 23),
            FieldKind::DayOfMonth => (1, 31),
            FieldKind::Month => (1, 12),
            FieldKind::DayOfWeek => (0, 6),
        };

        FieldSpec {
            kind: self,
            minimum,
            maximum,
        }
    }

    /// Zero-based position in the expression.
    pub const fn index(self) -> usize {
        match self {
            FieldKind::Minute => 0,
            FieldKind::Hour => 1,
            FieldKind::DayOfMonth => 2,
            FieldKind::Month => 3,
            FieldKind::DayOfWeek => 4,
        }
    }

    /// Lowercase name, used in messages and descriptions.
    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day of month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day of week",
        }
    }

    /// Capitalized name, suitable for table headers.
    pub const fn title(self) -> &'static str {
        match self {
            FieldKind::Minute => "Minute",
            FieldKind::Hour => "Hour",
            FieldKind::DayOfMonth => "Day of Month",
            FieldKind::Month => "Month",
            FieldKind::DayOfWeek => "Day of Week",
        }
    }

    /// Human-readable range of allowed values.
    pub const fn range_label(self) -> &'static str {
        match self {
            FieldKind::Minute => "0-59",
            FieldKind::Hour => "0-23",
            FieldKind::DayOfMonth => "1-31",
            FieldKind::Month => "1-12",
            FieldKind::DayOfWeek => "0-6 (Sun-Sat)",
        }
    }

    /// Parses `input` against this field's bounds, see [`parse_field`].
    #[inline]
    pub fn parse(self, input: &str) -> Result<FieldValueSet> {
        parse_field(input, &self.spec())
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static bounds of a field, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    kind: FieldKind,
    minimum: FieldValue,
    maximum: FieldValue,
}

impl FieldSpec {
    /// Field these bounds belong to.
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Zero-based position in the expression.
    pub const fn position(&self) -> usize {
        self.kind.index()
    }

    /// Smallest allowed value.
    pub const fn minimum(&self) -> FieldValue {
        self.minimum
    }

    /// Largest allowed value.
    pub const fn maximum(&self) -> FieldValue {
        self.maximum
    }
}

/// Parsed field: ascending, duplicate-free and never empty set of values within the field's bounds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldValueSet {
    kind: FieldKind,
    raw: String,
    values: BTreeSet<FieldValue>,
}

impl FieldValueSet {
    /// Field this set was parsed for.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Text the set was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = FieldValue> + '_ {
        self.values.iter().copied()
    }

    /// Returns `true` if `value` belongs to the set.
    #[inline]
    pub fn contains(&self, value: FieldValue) -> bool {
        self.values.contains(&value)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`, a successfully parsed field has at least one value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if the set covers every value of the field.
    pub fn is_full(&self) -> bool {
        let spec = self.kind.spec();
        self.values.len() == usize::from(spec.maximum - spec.minimum) + 1
    }
}

impl Display for FieldValueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parses a single cron field into the set of values it selects.
///
/// `input` is a comma-separated list of atoms: `*`, `*/step`, `lo-hi/step`, `lo-hi` or a bare number.
/// Values of all atoms are merged, deduplicated and sorted.
/// Parsing stops at the first invalid atom, and its error is returned.
pub fn parse_field(input: &str, spec: &FieldSpec) -> Result<FieldValueSet> {
    let atoms = input
        .split(',')
        .map(|atom| Atom::parse(atom, spec))
        .collect::<Result<Vec<_>>>()?;

    let values = atoms
        .into_iter()
        .flat_map(|atom| atom.series(spec))
        .collect::<BTreeSet<_>>();

    Ok(FieldValueSet {
        kind: spec.kind,
        raw: input.to_owned(),
        values,
    })
}

/// Single comma-separated item of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Atom {
    All,
    Particular(FieldValue),
    // start-finish
    Range(FieldValue, FieldValue),
    // start-finish/step
    RepeatingRange(FieldValue, FieldValue, FieldValue),
}

impl Atom {
    fn parse(input: &str, spec: &FieldSpec) -> Result<Self> {
        if input == "*" {
            Ok(Atom::All)
        } else if let Some((base, step)) = input.split_once('/') {
            let step = match utils::parse_number(step) {
                Number::Value(step) if step > 0 => step,
                _ => return Err(ParseError::InvalidStep {
                    field: spec.kind,
                    token: input.to_owned(),
                }),
            };

            if base == "*" {
                Ok(Atom::RepeatingRange(spec.minimum, spec.maximum, step))
            } else if let Some((start, end)) = base.split_once('-') {
                let (start, end) = parse_range(input, start, end, spec)?;
                Ok(Atom::RepeatingRange(start, end, step))
            } else {
                Err(ParseError::InvalidToken {
                    field: spec.kind,
                    token: input.to_owned(),
                })
            }
        } else if let Some((start, end)) = input.split_once('-') {
            let (start, end) = parse_range(input, start, end, spec)?;
            Ok(Atom::Range(start, end))
        } else {
            parse_value(input, input, spec).map(Atom::Particular)
        }
    }

    fn series(self, spec: &FieldSpec) -> SeriesWithStep {
        match self {
            Atom::All => SeriesWithStep::new(spec.minimum, spec.maximum, 1),
            Atom::Particular(value) => SeriesWithStep::new(value, value, 1),
            Atom::Range(start, end) => SeriesWithStep::new(start, end, 1),
            Atom::RepeatingRange(start, end, step) => SeriesWithStep::new(start, end, step),
        }
    }
}

/// Parses both range bounds of the atom `token`, checking bounds before the order.
fn parse_range(token: &str, start: &str, end: &str, spec: &FieldSpec) -> Result<(FieldValue, FieldValue)> {
    let start = parse_value(token, start, spec)?;
    let end = parse_value(token, end, spec)?;

    if start > end {
        Err(ParseError::InvalidRange {
            field: spec.kind,
            token: token.to_owned(),
        })
    } else {
        Ok((start, end))
    }
}

/// Converts `input`, which is a part of the atom `token`, into a value within the field's bounds.
fn parse_value(token: &str, input: &str, spec: &FieldSpec) -> Result<FieldValue> {
    let out_of_range = |value| ParseError::OutOfRange {
        field: spec.kind,
        token: token.to_owned(),
        value,
        minimum: spec.minimum,
        maximum: spec.maximum,
    };

    match utils::parse_number(input) {
        Number::Value(value) if value < spec.minimum || value > spec.maximum => Err(out_of_range(value)),
        Number::Value(value) => Ok(value),
        Number::Overflow => Err(out_of_range(FieldValue::MAX)),
        Number::NotNumber => Err(ParseError::InvalidToken {
            field: spec.kind,
            token: token.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rstest_reuse::{apply, template};

    fn values(kind: FieldKind, input: &str) -> Vec<FieldValue> {
        let set = kind.parse(input);
        assert!(
            set.is_ok(),
            "kind = {kind:?}, input = {input}, error = {}",
            set.err().unwrap()
        );
        set.unwrap().values().collect()
    }

    #[template]
    #[rstest]
    #[case(FieldKind::Minute)]
    #[case(FieldKind::Hour)]
    #[case(FieldKind::DayOfMonth)]
    #[case(FieldKind::Month)]
    #[case(FieldKind::DayOfWeek)]
    fn every_field(#[case] kind: FieldKind) {}

    #[apply(every_field)]
    fn test_every_literal_in_bounds(kind: FieldKind) {
        let spec = kind.spec();
        for value in spec.minimum()..=spec.maximum() {
            assert_eq!(values(kind, &value.to_string()), vec![value], "kind = {kind:?}");
        }
    }

    #[apply(every_field)]
    fn test_all(kind: FieldKind) {
        let spec = kind.spec();
        let set = kind.parse("*").unwrap();
        assert_eq!(
            set.values().collect::<Vec<_>>(),
            (spec.minimum()..=spec.maximum()).collect::<Vec<_>>()
        );
        assert!(set.is_full());
    }

    #[apply(every_field)]
    fn test_every_step(kind: FieldKind) {
        let spec = kind.spec();
        for step in 1..=spec.maximum() + 2 {
            assert_eq!(
                values(kind, &format!("*/{step}")),
                (spec.minimum()..=spec.maximum())
                    .step_by(step as usize)
                    .collect::<Vec<_>>(),
                "kind = {kind:?}, step = {step}"
            );
        }
    }

    #[apply(every_field)]
    fn test_every_range(kind: FieldKind) {
        let spec = kind.spec();
        for start in spec.minimum()..=spec.maximum() {
            for end in spec.minimum()..=spec.maximum() {
                let input = format!("{start}-{end}");
                let result = kind.parse(&input);
                if start > end {
                    assert!(
                        matches!(result, Err(ParseError::InvalidRange { field, ref token }) if field == kind && token == &input),
                        "kind = {kind:?}, input = {input}, result = {result:?}"
                    );
                } else {
                    assert_eq!(
                        result.unwrap().values().collect::<Vec<_>>(),
                        (start..=end).collect::<Vec<_>>(),
                        "kind = {kind:?}, input = {input}"
                    );
                }
            }
        }
    }

    #[apply(every_field)]
    fn test_zero_step(kind: FieldKind) {
        for input in ["*/0", "*/00", "*/-1", "*/", "*/x", "*/1.5", "*/ 2", "1/2/3", "0-5/0"] {
            assert!(
                matches!(kind.parse(input), Err(ParseError::InvalidStep { field, .. }) if field == kind),
                "kind = {kind:?}, input = {input}"
            );
        }
    }

    #[rstest]
    #[case(FieldKind::Minute, "1,1,2", vec![1, 2])]
    #[case(FieldKind::Minute, "05", vec![5])]
    #[case(FieldKind::Minute, "30,10,20", vec![10, 20, 30])]
    #[case(FieldKind::Minute, "0-5,3-8", vec![0, 1, 2, 3, 4, 5, 6, 7, 8])]
    #[case(FieldKind::Minute, "*/15,10", vec![0, 10, 15, 30, 45])]
    #[case(FieldKind::Minute, "10-30/5", vec![10, 15, 20, 25, 30])]
    #[case(FieldKind::Minute, "50-59/10", vec![50])]
    #[case(FieldKind::Minute, "*/59", vec![0, 59])]
    #[case(FieldKind::Minute, "*/60", vec![0])]
    #[case(FieldKind::Minute, "*/255", vec![0])]
    #[case(FieldKind::Minute, "10,12,25-30,40-45/2,*/30", vec![0, 10, 12, 25, 26, 27, 28, 29, 30, 40, 42, 44])]
    #[case(FieldKind::Hour, "9-17", (9..=17).collect::<Vec<_>>())]
    #[case(FieldKind::Hour, "*/6", vec![0, 6, 12, 18])]
    #[case(FieldKind::Hour, "18-23/2", vec![18, 20, 22])]
    #[case(FieldKind::DayOfMonth, "*/10", vec![1, 11, 21, 31])]
    #[case(FieldKind::DayOfMonth, "1,15,31", vec![1, 15, 31])]
    #[case(FieldKind::DayOfMonth, "28-31", vec![28, 29, 30, 31])]
    #[case(FieldKind::Month, "*/3", vec![1, 4, 7, 10])]
    #[case(FieldKind::Month, "4,12,1-2,10-12/2", vec![1, 2, 4, 10, 12])]
    #[case(FieldKind::DayOfWeek, "1-5", vec![1, 2, 3, 4, 5])]
    #[case(FieldKind::DayOfWeek, "6,0", vec![0, 6])]
    #[case(FieldKind::DayOfWeek, "*/2", vec![0, 2, 4, 6])]
    fn test_parse_field_valid(#[case] kind: FieldKind, #[case] input: &str, #[case] expected: Vec<FieldValue>) {
        let set = kind.parse(input).unwrap();
        assert_eq!(set.values().collect::<Vec<_>>(), expected, "input = {input}");
        assert_eq!(set.len(), expected.len());
        assert!(!set.is_empty());
        assert_eq!(set.kind(), kind);
        assert_eq!(set.raw(), input);
        assert_eq!(set.to_string(), input);
    }

    #[rstest]
    #[case(FieldKind::Minute, "60", "60", 60)]
    #[case(FieldKind::Minute, "1,60,x", "60", 60)]
    #[case(FieldKind::Minute, "50-60", "50-60", 60)]
    #[case(FieldKind::Minute, "0-70/5", "0-70/5", 70)]
    #[case(FieldKind::Minute, "99999", "99999", FieldValue::MAX)]
    #[case(FieldKind::Hour, "24", "24", 24)]
    #[case(FieldKind::DayOfMonth, "0", "0", 0)]
    #[case(FieldKind::DayOfMonth, "32", "32", 32)]
    #[case(FieldKind::DayOfMonth, "0-5", "0-5", 0)]
    #[case(FieldKind::Month, "0", "0", 0)]
    #[case(FieldKind::Month, "13", "13", 13)]
    #[case(FieldKind::DayOfWeek, "7", "7", 7)]
    fn test_parse_field_out_of_range(
        #[case] kind: FieldKind,
        #[case] input: &str,
        #[case] expected_token: &str,
        #[case] expected_value: FieldValue,
    ) {
        let spec = kind.spec();
        assert_eq!(
            kind.parse(input),
            Err(ParseError::OutOfRange {
                field: kind,
                token: expected_token.to_owned(),
                value: expected_value,
                minimum: spec.minimum(),
                maximum: spec.maximum(),
            }),
            "input = {input}"
        );
    }

    #[rstest]
    #[case(FieldKind::Minute, "", "")]
    #[case(FieldKind::Minute, ",", "")]
    #[case(FieldKind::Minute, "1,", "")]
    #[case(FieldKind::Minute, ",1", "")]
    #[case(FieldKind::Minute, "1,,2", "")]
    #[case(FieldKind::Minute, "a", "a")]
    #[case(FieldKind::Minute, "1,b,60", "b")]
    #[case(FieldKind::Minute, "-", "-")]
    #[case(FieldKind::Minute, "-1", "-1")]
    #[case(FieldKind::Minute, "1-", "1-")]
    #[case(FieldKind::Minute, "1-2-3", "1-2-3")]
    #[case(FieldKind::Minute, "a-b", "a-b")]
    #[case(FieldKind::Minute, "5/10", "5/10")]
    #[case(FieldKind::Minute, " 2", " 2")]
    #[case(FieldKind::Minute, "**", "**")]
    #[case(FieldKind::Minute, "?", "?")]
    #[case(FieldKind::DayOfMonth, "L", "L")]
    #[case(FieldKind::DayOfMonth, "15W", "15W")]
    #[case(FieldKind::Month, "JAN", "JAN")]
    #[case(FieldKind::DayOfWeek, "MON", "MON")]
    #[case(FieldKind::DayOfWeek, "1#2", "1#2")]
    #[case(FieldKind::DayOfWeek, "5L", "5L")]
    fn test_parse_field_invalid_token(#[case] kind: FieldKind, #[case] input: &str, #[case] expected_token: &str) {
        assert_eq!(
            kind.parse(input),
            Err(ParseError::InvalidToken {
                field: kind,
                token: expected_token.to_owned(),
            }),
            "input = '{input}'"
        );
    }

    #[rstest]
    #[case(FieldKind::Minute, "30-10", "30-10")]
    #[case(FieldKind::Minute, "30-10/5", "30-10/5")]
    #[case(FieldKind::Hour, "1,23-22", "23-22")]
    #[case(FieldKind::DayOfWeek, "5-1", "5-1")]
    fn test_parse_field_invalid_range(#[case] kind: FieldKind, #[case] input: &str, #[case] expected_token: &str) {
        assert_eq!(
            kind.parse(input),
            Err(ParseError::InvalidRange {
                field: kind,
                token: expected_token.to_owned(),
            }),
            "input = '{input}'"
        );
    }

    #[test]
    fn test_step_checked_before_base() {
        assert!(matches!(
            FieldKind::Minute.parse("a-b/0"),
            Err(ParseError::InvalidStep { .. })
        ));
        assert!(matches!(
            FieldKind::Minute.parse("5/0"),
            Err(ParseError::InvalidStep { .. })
        ));
    }

    #[rstest]
    #[case(FieldKind::Minute, 0, 0, 59, "minute", "0-59")]
    #[case(FieldKind::Hour, 1, 0, 23, "hour", "0-23")]
    #[case(FieldKind::DayOfMonth, 2, 1, 31, "day of month", "1-31")]
    #[case(FieldKind::Month, 3, 1, 12, "month", "1-12")]
    #[case(FieldKind::DayOfWeek, 4, 0, 6, "day of week", "0-6 (Sun-Sat)")]
    fn test_field_kind_metadata(
        #[case] kind: FieldKind,
        #[case] index: usize,
        #[case] minimum: FieldValue,
        #[case] maximum: FieldValue,
        #[case] name: &str,
        #[case] label: &str,
    ) {
        let spec = kind.spec();
        assert_eq!(FieldKind::ALL[index], kind);
        assert_eq!(spec.position(), index);
        assert_eq!(spec.kind(), kind);
        assert_eq!(spec.minimum(), minimum);
        assert_eq!(spec.maximum(), maximum);
        assert_eq!(kind.to_string(), name);
        assert_eq!(kind.range_label(), label);
    }

    #[test]
    fn test_is_full() {
        assert!(FieldKind::DayOfWeek.parse("0-6").unwrap().is_full());
        assert!(FieldKind::DayOfWeek.parse("0,1-3,4-6").unwrap().is_full());
        assert!(!FieldKind::DayOfWeek.parse("1-6").unwrap().is_full());
        assert!(!FieldKind::Minute.parse("*/2").unwrap().is_full());
    }
}
