//! Outcome metrics.
//!
//! Recorded through the `metrics` facade; they go nowhere until the host
//! process installs a recorder (Prometheus exporter or similar).
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `intake_outcomes_total` | Counter | `endpoint`, `outcome` | Processed requests by outcome |
//! | `intake_field_errors` | Histogram | `endpoint`, `outcome` | Field errors per rejected request |

use crate::logging::fields;
use intake_core::Outcome;
use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Counter of processed requests.
pub const OUTCOMES_TOTAL: &str = "intake_outcomes_total";

/// Histogram of field errors per rejected request.
pub const FIELD_ERRORS: &str = "intake_field_errors";

/// Registers descriptions for the Intake metrics with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(OUTCOMES_TOTAL, "Requests processed, by endpoint and outcome");
    describe_histogram!(FIELD_ERRORS, "Field errors reported per rejected request");
}

/// Records one processed request.
///
/// Increments `intake_outcomes_total` and, for rejected requests, records
/// the number of field errors.
pub fn record_outcome(endpoint: &str, outcome: &Outcome) {
    counter!(
        OUTCOMES_TOTAL,
        fields::ENDPOINT => endpoint.to_string(),
        fields::OUTCOME => outcome.label()
    )
    .increment(1);

    let errors = outcome.errors().len();
    if errors > 0 {
        histogram!(
            FIELD_ERRORS,
            fields::ENDPOINT => endpoint.to_string(),
            fields::OUTCOME => outcome.label()
        )
        .record(f64::from(u32::try_from(errors).unwrap_or(u32::MAX)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{ErrorResponse, FieldError};

    #[test]
    fn test_record_without_recorder_is_noop() {
        describe_metrics();
        let outcome = Outcome::BadRequest(ErrorResponse::bad_request(vec![FieldError::new(
            "UserID",
            "This field is required",
        )]));
        record_outcome("update_user", &outcome);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(OUTCOMES_TOTAL, "intake_outcomes_total");
        assert_eq!(FIELD_ERRORS, "intake_field_errors");
    }
}
