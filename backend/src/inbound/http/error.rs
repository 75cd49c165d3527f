//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Prepare a server-side failure for the response body.
///
/// Release builds replace the message of internal and unavailable errors with
/// a generic one; the underlying detail stays in the logs, reachable through
/// the trace id. Debug builds return the detailed message so local runs can
/// diagnose without log access. Client-addressable errors pass through
/// untouched in both.
fn redact_for_client(error: &Error, redact_detail: bool) -> Error {
    if !redact_detail {
        return error.clone();
    }
    let mut redacted = match error.code() {
        ErrorCode::InternalError => Error::internal("Internal server error"),
        ErrorCode::ServiceUnavailable => {
            Error::service_unavailable("Service temporarily unavailable")
        }
        _ => return error.clone(),
    };
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id.to_owned());
    }
    redacted
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_for_client(self, !cfg!(debug_assertions)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_request(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case::unauthorized(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case::conflict(Error::conflict("dup"), StatusCode::CONFLICT)]
    #[case::unavailable(
        Error::service_unavailable("down"),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_error_codes_to_status(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let redacted = redact_for_client(&Error::internal("pool exhausted on node 3"), true);
        assert_eq!(redacted.message(), "Internal server error");
    }

    #[rstest]
    fn unavailable_errors_are_redacted() {
        let error = Error::service_unavailable("settings store unavailable: connection refused")
            .with_trace_id("abc".to_owned());

        let body = serde_json::to_value(redact_for_client(&error, true))
            .expect("serialise redacted error");
        assert_eq!(body["code"], "service_unavailable");
        assert_eq!(body["message"], "Service temporarily unavailable");
        assert_eq!(body["traceId"], "abc");
    }

    #[rstest]
    #[case::unavailable(Error::service_unavailable("settings store unavailable: pool timed out"))]
    #[case::internal(Error::internal("row disappeared mid-transaction"))]
    fn debug_builds_keep_server_error_detail(#[case] error: Error) {
        let kept = redact_for_client(&error, false);
        assert_eq!(kept.message(), error.message());
    }

    #[rstest]
    fn client_errors_keep_their_message() {
        let kept =
            redact_for_client(&Error::invalid_request("highContrast must be boolean"), true);
        assert_eq!(kept.message(), "highContrast must be boolean");
    }

    #[rstest]
    fn error_response_carries_trace_header() {
        let error = Error::conflict("dup").with_trace_id("abc".to_owned());
        let response = error.error_response();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        assert_eq!(header, Some("abc"));
    }
}
