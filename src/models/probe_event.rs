use std::fmt::{Display, Formatter};
use std::time::Duration;

use reqwest::StatusCode;

use crate::models::CheckFailure;

/// One notable moment in the life of a wait, delivered to the client's
/// reporter. The `Display` form is the plain (uncolored) log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    /// The first request is being postponed.
    InitialDelay { delay: Duration },
    /// An attempt is about to issue its request.
    AttemptStarted { attempt: u64 },
    /// A response arrived and is about to be evaluated.
    ResponseReceived { status: StatusCode },
    /// The response failed one of the expectation checks.
    CheckFailed { failure: CheckFailure },
    /// The request failed in the transport (connect, DNS, TLS, redirect
    /// limit).
    RequestFailed { message: String },
    /// A single attempt was aborted at the per-request cap. Distinct from
    /// [`ProbeEvent::ReachedTimeout`], which ends the whole wait.
    RequestTimedOut { limit: Duration },
    /// The overall deadline elapsed; the wait is over.
    ReachedTimeout,
    /// The success threshold was reached.
    ExpectationMet,
}

impl Display for ProbeEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeEvent::InitialDelay { delay } => {
                write!(f, "[initial delay] waiting {delay:?} before the first request")
            }
            ProbeEvent::AttemptStarted { attempt } => {
                write!(f, "[sending request] #{attempt}")
            }
            ProbeEvent::ResponseReceived { status } => {
                write!(f, "[received response] {}", status.as_u16())
            }
            ProbeEvent::CheckFailed { failure } => {
                write!(f, "[failed check] {failure}")
            }
            ProbeEvent::RequestFailed { message } => {
                write!(f, "[failed request] {message}")
            }
            ProbeEvent::RequestTimedOut { limit } => {
                write!(f, "[failed request] request timeout after {limit:?}")
            }
            ProbeEvent::ReachedTimeout => write!(f, "reached timeout"),
            ProbeEvent::ExpectationMet => write!(f, "received expected response"),
        }
    }
}
