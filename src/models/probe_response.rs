use std::borrow::Cow;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// The parts of an HTTP response the expectation checks look at.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProbeResponse {
    /// Lossy text view of the body, used for snippet matching.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
