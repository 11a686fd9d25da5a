//! Inline form validation and duplicate-submission prevention.
//!
//! Errors are collected per field so each one renders next to the control
//! that caused it; they only block the submit action.

mod submit;
mod validation;

#[cfg(test)]
mod tests;

pub use submit::{SubmitError, SubmitGuard, SubmitTicket};
pub use validation::{FieldErrors, FieldKey, ValidationError, date_range, required};
