//! Caller identity extraction.
//!
//! The service has no session layer; the calling user is identified by the
//! `X-Sharer-User-Id` header on every endpoint that needs one. A missing or
//! malformed header is rejected before the handler runs.

use std::future::{ready, Ready};

use actix_web::http::StatusCode;
use actix_web::{dev::Payload, FromRequest, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use lh_shared::types::response::ErrorBody;

/// Name of the identity header.
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// The id of the calling user, taken from the `X-Sharer-User-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("missing {SHARER_USER_ID} header")]
    MissingHeader,

    #[error("invalid {SHARER_USER_ID} header: {value}")]
    InvalidHeader { value: String },
}

impl ResponseError for IdentityError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorBody::new(self.to_string()).with_code("INVALID_IDENTITY_HEADER"))
    }
}

impl FromRequest for SharerId {
    type Error = IdentityError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.headers().get(SHARER_USER_ID) {
            None => Err(IdentityError::MissingHeader),
            Some(raw) => raw
                .to_str()
                .ok()
                .and_then(|v| v.trim().parse::<i64>().ok())
                .map(SharerId)
                .ok_or_else(|| IdentityError::InvalidHeader {
                    value: String::from_utf8_lossy(raw.as_bytes()).into_owned(),
                }),
        };
        ready(result)
    }
}
