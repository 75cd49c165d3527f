//! Caller identity extraction for HTTP handlers.
//!
//! Identity arrives out-of-band as an opaque `x-user-id` header carrying the
//! caller's UUID. The subsystem does not authenticate; it only rejects
//! requests whose identity is missing or not a syntactically valid UUID.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::domain::{Error, UserId};

/// Header conveying the caller's user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller identity for the current request.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    user_id: UserId,
}

impl CallerIdentity {
    /// The caller's user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Consume the identity, yielding the user identifier.
    pub fn into_user_id(self) -> UserId {
        self.user_id
    }
}

fn identity_from_request(request: &HttpRequest) -> Result<CallerIdentity, Error> {
    let raw = request
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| Error::unauthorized("missing x-user-id header"))?
        .to_str()
        .map_err(|_| Error::unauthorized("x-user-id header is not valid UTF-8"))?;

    let user_id = UserId::new(raw)
        .map_err(|_| Error::unauthorized("x-user-id header is not a valid UUID"))?;
    Ok(CallerIdentity { user_id })
}

impl FromRequest for CallerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(request: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use crate::domain::ErrorCode;

    #[rstest]
    fn accepts_a_valid_uuid_header() {
        let request = TestRequest::default()
            .insert_header((USER_ID_HEADER, "11111111-1111-1111-1111-111111111111"))
            .to_http_request();

        let identity = identity_from_request(&request).expect("identity extracted");
        assert_eq!(
            identity.user_id().to_string(),
            "11111111-1111-1111-1111-111111111111"
        );
    }

    #[rstest]
    fn rejects_a_missing_header() {
        let request = TestRequest::default().to_http_request();
        let err = identity_from_request(&request).expect_err("missing header");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case::not_a_uuid("alice")]
    #[case::truncated("11111111-1111")]
    #[case::empty("")]
    fn rejects_malformed_identifiers(#[case] raw: &str) {
        let request = TestRequest::default()
            .insert_header((USER_ID_HEADER, raw))
            .to_http_request();
        let err = identity_from_request(&request).expect_err("malformed id");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
