use super::*;
use futures::executor::block_on;

const NAME: FieldKey = FieldKey::new("name");
const FROM: FieldKey = FieldKey::new("from");
const TO: FieldKey = FieldKey::new("to");

#[test]
fn required_rejects_blank_input() {
    assert!(required(NAME, "Room 204").is_ok());
    assert_eq!(
        required(NAME, "   "),
        Err(ValidationError::Required { field: NAME })
    );
}

#[test]
fn date_range_reports_on_the_end_field() {
    assert!(date_range(FROM, "2024-01-10", TO, "2024-01-10").is_ok());
    assert!(date_range(FROM, "", TO, "2024-01-01").is_ok());

    let error = date_range(FROM, "2024-01-20", TO, "2024-01-10").unwrap_err();
    assert_eq!(error.field(), TO);
    assert_eq!(error.message().as_ref(), "to must not be before from");

    assert_eq!(
        date_range(FROM, "2024-13-01", TO, ""),
        Err(ValidationError::InvalidDate { field: FROM })
    );
}

#[test]
fn errors_stay_next_to_their_field() {
    let mut errors = FieldErrors::new();
    assert!(!errors.check(required(NAME, "")));
    assert!(!errors.check(date_range(FROM, "2024-02-02", TO, "2024-02-01")));
    assert!(errors.check(required(FROM, "2024-02-02")));

    assert_eq!(errors.len(), 2);
    assert!(errors.field(FROM).is_empty());
    assert_eq!(errors.message(NAME).as_deref().map(|v| &**v), Some("name is required"));
    assert_eq!(errors.first_invalid(), Some(NAME));
    assert!(errors.blocks_submit());

    errors.clear_field(NAME);
    errors.clear_field(TO);
    assert!(!errors.blocks_submit());
}

#[test]
fn repeated_checks_do_not_duplicate_messages() {
    let mut errors = FieldErrors::new();
    errors.check(required(NAME, ""));
    errors.check(required(NAME, ""));
    assert_eq!(errors.field(NAME).len(), 1);
}

#[test]
fn second_submit_while_in_flight_is_rejected() {
    let guard = SubmitGuard::new();
    let errors = FieldErrors::new();

    let ticket = guard.try_submit::<()>(&errors).expect("first submit");
    assert!(guard.is_in_flight());
    assert_eq!(
        guard.try_submit::<()>(&errors).unwrap_err(),
        SubmitError::AlreadySubmitting
    );

    drop(ticket);
    assert!(!guard.is_in_flight());
    assert!(guard.try_submit::<()>(&errors).is_ok());
}

#[test]
fn invalid_fields_block_only_the_submit() {
    let guard = SubmitGuard::new();
    let mut errors = FieldErrors::new();
    errors.check(required(NAME, ""));

    assert_eq!(
        guard.try_submit::<()>(&errors).unwrap_err(),
        SubmitError::Invalid(1)
    );
    assert!(!guard.is_in_flight());
}

#[test]
fn run_clears_the_flag_after_a_failure() {
    let guard = SubmitGuard::new();
    let errors = FieldErrors::new();

    let result: Result<(), SubmitError<&str>> =
        block_on(guard.run(&errors, || async { Err("server unavailable") }));
    assert_eq!(result, Err(SubmitError::Failed("server unavailable")));
    assert!(!guard.is_in_flight());

    let inner = guard.clone();
    let nested: Result<bool, SubmitError<&str>> = block_on(guard.run(&errors, || async move {
        Ok(matches!(
            inner.begin::<&str>(),
            Err(SubmitError::AlreadySubmitting)
        ))
    }));
    assert_eq!(nested, Ok(true));
}
