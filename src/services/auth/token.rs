//! Bearer credential → `Identity`.
//!
//! The credential is base64-encoded JSON of the shape `{"userId": <any>, "roles": [<any>, ...]}`.
//! Nothing is signed or verified; this only checks shape.
//!
//! Every failure collapses into `AppError::InvalidCredential` at the boundary. The finer
//! `TokenError` variants exist for logs only.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde_json::Value;
use thiserror::Error;

use crate::api::extractors::Identity;
use crate::error::AppError;

// Padding optional, trailing bits tolerated.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("credential is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("credential is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("credential payload is not an object")]
    NotAnObject,
    #[error("credential payload has no userId")]
    MissingUserId,
    #[error("credential payload roles is not an array")]
    RolesNotArray,
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::InvalidCredential
    }
}

pub fn decode(credential: &str) -> Result<Identity, TokenError> {
    let bytes = LENIENT_BASE64.decode(normalize(credential))?;
    let json = String::from_utf8_lossy(&bytes);
    let payload: Value = serde_json::from_str(&json)?;

    let object = payload.as_object().ok_or(TokenError::NotAnObject)?;

    let user_id = object
        .get("userId")
        .filter(|v| is_truthy(v))
        .ok_or(TokenError::MissingUserId)?;

    let roles = object
        .get("roles")
        .and_then(Value::as_array)
        .ok_or(TokenError::RolesNotArray)?;

    Ok(Identity::new(
        coerce_to_string(user_id),
        roles.iter().map(coerce_to_string).collect(),
    ))
}

/// Reduces a credential to plain standard-alphabet base64:
/// - stops at the first `=`
/// - maps the URL-safe `-`/`_` to `+`/`/`
/// - skips anything else outside the alphabet (whitespace, stray punctuation)
/// - drops a dangling final character that cannot carry a whole byte
fn normalize(credential: &str) -> Vec<u8> {
    let mut out: Vec<u8> = credential
        .bytes()
        .take_while(|&b| b != b'=')
        .filter_map(|b| match b {
            b'-' => Some(b'+'),
            b'_' => Some(b'/'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => Some(b),
            _ => None,
        })
        .collect();
    if out.len() % 4 == 1 {
        out.pop();
    }
    out
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String conversion with the same results a JavaScript client would expect from `String(x)`.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // 2.0 -> "2"
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
