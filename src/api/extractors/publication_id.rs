/*
 * Responsibility
 * - Take the `{id}` path segment as a String and turn it into the internal i64 id
 * - Only an optional '-' followed by ASCII digits is accepted
 * - Failure becomes a 400 AppError
 * - A well-formed number outside the i64 range names no stored record -> 404
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

const NUMERIC_EXPECTED: &str = "Validation failed (numeric string is expected)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationId(pub i64);

fn parse_numeric(raw: &str) -> Result<i64, AppError> {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::bad_request(NUMERIC_EXPECTED));
    }
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }

    // too many digits to be a number at all
    if !raw.parse::<f64>().is_ok_and(f64::is_finite) {
        return Err(AppError::bad_request(NUMERIC_EXPECTED));
    }
    let significant = digits.trim_start_matches('0');
    Err(AppError::NotFound {
        id: format!("{sign}{significant}"),
    })
}

impl<S> FromRequestParts<S> for PublicationId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(NUMERIC_EXPECTED))?;
        parse_numeric(&raw).map(Self)
    }
}
