use crate::core::errors::ExchangeError;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// A completed HTTP exchange: status code and the fully read body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, for diagnostics
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn classify(&self) -> ResponseClass<'_> {
        classify(self.status, &self.body)
    }
}

/// Outcome of inspecting the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass<'a> {
    Success(&'a [u8]),
    Failure(&'a [u8]),
}

/// 200 is the only success status; every other status carries an error body.
pub fn classify(status: u16, body: &[u8]) -> ResponseClass<'_> {
    if status == 200 {
        ResponseClass::Success(body)
    } else {
        ResponseClass::Failure(body)
    }
}

/// Decode a success body into `T`
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ExchangeError> {
    serde_json::from_slice(body).map_err(|e| {
        ExchangeError::ResponseDecodeError(format!("Failed to parse JSON response: {}", e))
    })
}

/// Classify `raw` and either decode the payload or hand the body to `handle_error`.
///
/// `handle_error` is the exchange-specific error mapper; it is expected to
/// return [`ExchangeError::ApiRejected`] for a well-formed error body and
/// [`ExchangeError::ResponseDecodeError`] otherwise.
pub fn decode_response<T, F>(raw: &RawResponse, handle_error: F) -> Result<T, ExchangeError>
where
    T: DeserializeOwned,
    F: FnOnce(&[u8]) -> ExchangeError,
{
    match raw.classify() {
        ResponseClass::Success(body) => decode_json(body),
        ResponseClass::Failure(body) => Err(handle_error(body)),
    }
}
