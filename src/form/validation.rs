use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use gpui::SharedString;
use thiserror::Error;

use crate::components::date_picker_state::parse_iso;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: FieldKey },
    #[error("{field} must be a date in YYYY-MM-DD form")]
    InvalidDate { field: FieldKey },
    #[error("{end} must not be before {start}")]
    DateRangeInverted { start: FieldKey, end: FieldKey },
}

impl ValidationError {
    /// Field the message is shown next to.
    pub fn field(&self) -> FieldKey {
        match self {
            Self::Required { field } | Self::InvalidDate { field } => *field,
            Self::DateRangeInverted { end, .. } => *end,
        }
    }

    pub fn message(&self) -> SharedString {
        self.to_string().into()
    }
}

/// Whitespace-only input counts as missing.
pub fn required(field: FieldKey, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn parse_field(field: FieldKey, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_iso(value)
        .map(Some)
        .ok_or(ValidationError::InvalidDate { field })
}

/// `start..=end` must be ordered. Empty ends pass; pair with [`required`]
/// when a bound is mandatory.
pub fn date_range(
    start_field: FieldKey,
    start: &str,
    end_field: FieldKey,
    end: &str,
) -> Result<(), ValidationError> {
    let start_date = parse_field(start_field, start)?;
    let end_date = parse_field(end_field, end)?;
    match (start_date, end_date) {
        (Some(start_date), Some(end_date)) if end_date < start_date => {
            Err(ValidationError::DateRangeInverted {
                start: start_field,
                end: end_field,
            })
        }
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<FieldKey, Vec<ValidationError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of a failed check. Returns whether it passed.
    pub fn check(&mut self, result: Result<(), ValidationError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                self.insert(error);
                false
            }
        }
    }

    pub fn insert(&mut self, error: ValidationError) {
        let errors = self.errors.entry(error.field()).or_default();
        if !errors.contains(&error) {
            errors.push(error);
        }
    }

    pub fn clear_field(&mut self, field: FieldKey) {
        self.errors.remove(&field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn field(&self, field: FieldKey) -> &[ValidationError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for `field`, ready for a control's `error` slot.
    pub fn message(&self, field: FieldKey) -> Option<SharedString> {
        self.field(field).first().map(ValidationError::message)
    }

    pub fn first_invalid(&self) -> Option<FieldKey> {
        self.errors.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn blocks_submit(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values().flatten()
    }
}
