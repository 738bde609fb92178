use std::fmt::{Display, Formatter};

use reqwest::StatusCode;
use reqwest::header::HeaderName;

use crate::models::ProbeResponse;

/// The checks a response must pass, evaluated in a fixed order: required
/// headers first, then required body snippets, then the status code. The
/// first failing check short-circuits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectations {
    pub required_headers: Vec<(HeaderName, String)>,
    pub required_snippets: Vec<String>,
    pub status_codes: Vec<StatusCode>,
}

/// The first expectation a response failed to meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    MissingHeader {
        name: String,
    },
    HeaderMismatch {
        name: String,
        expected: String,
        actual: String,
    },
    MissingSnippet {
        snippet: String,
    },
    UnexpectedStatus {
        status: StatusCode,
        expected: Vec<StatusCode>,
    },
}

impl Expectations {
    /// Evaluates the response against all checks, returning the first
    /// failure, or `None` when the response passes.
    pub fn evaluate(&self, response: &ProbeResponse) -> Option<CheckFailure> {
        for (name, expected) in &self.required_headers {
            match response.headers.get(name) {
                None => {
                    return Some(CheckFailure::MissingHeader {
                        name: name.to_string(),
                    });
                }
                Some(actual) if actual.as_bytes() != expected.as_bytes() => {
                    return Some(CheckFailure::HeaderMismatch {
                        name: name.to_string(),
                        expected: expected.clone(),
                        actual: String::from_utf8_lossy(actual.as_bytes()).into_owned(),
                    });
                }
                Some(_) => {}
            }
        }

        let body = response.body_text();
        for snippet in &self.required_snippets {
            if !body.contains(snippet.as_str()) {
                return Some(CheckFailure::MissingSnippet {
                    snippet: snippet.clone(),
                });
            }
        }

        if !self.status_codes.contains(&response.status) {
            return Some(CheckFailure::UnexpectedStatus {
                status: response.status,
                expected: self.status_codes.clone(),
            });
        }

        None
    }
}

impl Display for CheckFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckFailure::MissingHeader { name } => {
                write!(f, "missing required header (\"{name}\")")
            }
            CheckFailure::HeaderMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "header values do not match (header: \"{name}\", expected: \"{expected}\", actual: \"{actual}\")"
            ),
            CheckFailure::MissingSnippet { snippet } => {
                write!(f, "missing required snippet (\"{snippet}\")")
            }
            CheckFailure::UnexpectedStatus { status, expected } => {
                let expected = expected
                    .iter()
                    .map(|code| code.as_u16().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "status code {} is not among expected status codes ({expected})",
                    status.as_u16()
                )
            }
        }
    }
}
