use std::time::Duration;

use crate::models::HeaderSpec;

/// Options for waiting for an HTTP endpoint to return the expected response.
///
/// All fields have defaults matching the CLI defaults, so
/// `WaitOptions::builder().build()` describes the common case: poll once per
/// second for up to a minute, expecting a single `200` response.
///
/// # Examples
///
/// ```
/// use upwait::models::WaitOptions;
/// use std::time::Duration;
///
/// let options = WaitOptions::builder()
///     .status_codes(vec![200, 404])
///     .timeout(Duration::from_secs(120))
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, typed_builder::TypedBuilder)]
#[builder(doc)]
pub struct WaitOptions {
    /// Follow redirect responses automatically. Configured on the transport;
    /// when disabled, the redirect response itself is evaluated against the
    /// expectations.
    #[builder(default = true)]
    pub follow_redirect: bool,

    /// Maximum number of redirects to follow before the attempt is aborted as
    /// a failed request.
    #[builder(default = 5)]
    pub max_redirects: usize,

    /// Extra headers merged into every request. A default `user-agent` is set
    /// unless one is provided here.
    #[builder(default)]
    pub request_headers: Vec<HeaderSpec>,

    /// Headers the response must contain, with exact value match.
    #[builder(default)]
    pub required_headers: Vec<HeaderSpec>,

    /// Substrings that must all appear in the response body.
    #[builder(default)]
    pub required_snippets: Vec<String>,

    /// Status codes accepted as successful. Must not be empty.
    #[builder(default = vec![200])]
    pub status_codes: Vec<u16>,

    /// How long to wait before the first request. Not counted against
    /// `timeout`.
    #[builder(default)]
    pub initial_delay: Duration,

    /// Target spacing between attempt starts.
    #[builder(default = Duration::from_secs(1))]
    pub interval: Duration,

    /// How long to wait for an individual request before aborting it and
    /// retrying. `None` disables the per-attempt cap.
    #[builder(default = Some(Duration::from_secs(5)))]
    pub request_timeout: Option<Duration>,

    /// Total budget for the whole wait, measured from after the initial
    /// delay.
    #[builder(default = Duration::from_secs(60))]
    pub timeout: Duration,

    /// Number of consecutive passing attempts required before the wait is
    /// considered successful. Must be at least 1.
    #[builder(default = 1)]
    pub success_threshold: u32,

    /// Suppress event reporting.
    #[builder(default = false)]
    pub quiet: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        WaitOptions::builder().build()
    }
}
