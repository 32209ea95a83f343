//! Assertions on [`Outcome`]s.

use intake_core::{FieldError, Outcome, TypedRecord};

/// Assertion helpers for [`Outcome`].
///
/// Each assertion panics with the full error list on failure and returns
/// `&Self` so checks can be chained.
///
/// # Example
///
/// ```
/// use intake_core::{ErrorResponse, FieldError, Outcome};
/// use intake_test::OutcomeAssertions;
///
/// let outcome = Outcome::Unprocessable(ErrorResponse::unprocessable(vec![
///     FieldError::new("Name", "Minimum 3 characters required").with_value("Al"),
/// ]));
///
/// outcome
///     .assert_unprocessable()
///     .assert_error("Name", "Minimum 3 characters required")
///     .assert_error_count(1);
/// ```
pub trait OutcomeAssertions {
    /// Asserts the outcome is valid and returns the record.
    fn assert_valid(&self) -> &TypedRecord;

    /// Asserts the outcome is a 400.
    fn assert_bad_request(&self) -> &Self;

    /// Asserts the outcome is a 422.
    fn assert_unprocessable(&self) -> &Self;

    /// Asserts an error exists for `field` with exactly `message`.
    fn assert_error(&self, field: &str, message: &str) -> &Self;

    /// Asserts an error for `field` carries `value`.
    fn assert_error_value(&self, field: &str, value: &str) -> &Self;

    /// Asserts no error mentions `field`.
    fn assert_no_error_for(&self, field: &str) -> &Self;

    /// Asserts the number of field errors.
    fn assert_error_count(&self, expected: usize) -> &Self;
}

impl OutcomeAssertions for Outcome {
    #[track_caller]
    fn assert_valid(&self) -> &TypedRecord {
        match self.record() {
            Some(record) => record,
            None => panic!(
                "Expected valid outcome, got {}: {}",
                self.label(),
                describe(self.errors())
            ),
        }
    }

    #[track_caller]
    fn assert_bad_request(&self) -> &Self {
        assert!(
            matches!(self, Self::BadRequest(_)),
            "Expected bad_request, got {}: {}",
            self.label(),
            describe(self.errors())
        );
        self
    }

    #[track_caller]
    fn assert_unprocessable(&self) -> &Self {
        assert!(
            matches!(self, Self::Unprocessable(_)),
            "Expected unprocessable, got {}: {}",
            self.label(),
            describe(self.errors())
        );
        self
    }

    #[track_caller]
    fn assert_error(&self, field: &str, message: &str) -> &Self {
        assert!(
            self.errors()
                .iter()
                .any(|e| e.field == field && e.message == message),
            "Expected error '{}' on field '{}', got: {}",
            message,
            field,
            describe(self.errors())
        );
        self
    }

    #[track_caller]
    fn assert_error_value(&self, field: &str, value: &str) -> &Self {
        assert!(
            self.errors()
                .iter()
                .any(|e| e.field == field && e.value.as_deref() == Some(value)),
            "Expected value '{}' on field '{}', got: {}",
            value,
            field,
            describe(self.errors())
        );
        self
    }

    #[track_caller]
    fn assert_no_error_for(&self, field: &str) -> &Self {
        assert!(
            self.errors().iter().all(|e| e.field != field),
            "Expected no error on field '{}', got: {}",
            field,
            describe(self.errors())
        );
        self
    }

    #[track_caller]
    fn assert_error_count(&self, expected: usize) -> &Self {
        assert_eq!(
            self.errors().len(),
            expected,
            "Expected {} errors, got: {}",
            expected,
            describe(self.errors())
        );
        self
    }
}

fn describe(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return "no errors".to_string();
    }
    errors
        .iter()
        .map(|e| match &e.value {
            Some(value) => format!("{}: {} ({value})", e.field, e.message),
            None => format!("{}: {}", e.field, e.message),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
