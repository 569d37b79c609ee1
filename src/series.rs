/// Generator of stepped field values.
use crate::field::FieldValue;

/// Generator (iterator) state: `start, start + step, start + 2 * step, ...` up to `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SeriesWithStep {
    end: FieldValue,
    step: FieldValue,
    next: Option<FieldValue>,
}

impl SeriesWithStep {
    /// Caller is responsible to ensure that `step` is positive,
    /// a zero step would repeat `start` forever.
    #[inline]
    pub(crate) fn new(start: FieldValue, end: FieldValue, step: FieldValue) -> Self {
        debug_assert!(step > 0, "step value is 0");

        let next = if start > end { None } else { Some(start) };
        Self { end, step, next }
    }
}

impl Iterator for SeriesWithStep {
    type Item = FieldValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.checked_add(self.step).filter(|next| *next <= self.end);
        Some(current)
    }
}
