//! JSON rendering of outcomes.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use intake_core::Outcome;

/// Renders an outcome as an `application/json` response with `status`.
///
/// ```
/// use intake::{into_response, ErrorResponse, FieldError, Outcome};
///
/// let outcome = Outcome::BadRequest(ErrorResponse::bad_request(vec![FieldError::new(
///     "UserID",
///     "This field is required",
/// )]));
/// let response = into_response(outcome.status_code(), &outcome);
///
/// assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
/// assert_eq!(response.headers()["content-type"], "application/json");
/// ```
#[must_use]
pub fn into_response(status: StatusCode, outcome: &Outcome) -> Response<Bytes> {
    let body = serde_json::to_vec(&outcome.to_body()).unwrap_or_default();

    let mut response = Response::new(Bytes::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
