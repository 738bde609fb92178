use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::models::{Expectations, ProbeRequest, WaitOptions};

const DEFAULT_USER_AGENT: &str = concat!("upwait/", env!("CARGO_PKG_VERSION"));

/// The validated runtime view of a wait: parsed URL, merged request headers,
/// compiled expectations, and the timing knobs. Built once, before any state
/// transition; construction failure means no request is ever issued.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbePlan {
    pub url: Url,
    pub request_headers: HeaderMap,
    pub expectations: Expectations,
    pub initial_delay: Duration,
    pub interval: Duration,
    pub request_timeout: Option<Duration>,
    pub timeout: Duration,
    pub success_threshold: u32,
    pub quiet: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("URL must not be empty")]
    EmptyUrl,
    #[error("invalid URL \"{url}\": {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("success threshold must be greater than 0")]
    ZeroSuccessThreshold,
    #[error("at least one accepted status code is required")]
    NoStatusCodes,
    #[error("invalid status code {code}")]
    InvalidStatusCode { code: u16 },
    #[error("invalid header name \"{name}\"")]
    InvalidHeaderName { name: String },
    #[error("invalid value for header \"{name}\"")]
    InvalidHeaderValue { name: String },
}

impl ProbePlan {
    pub fn new(url: &str, options: &WaitOptions) -> Result<ProbePlan, ConfigurationError> {
        if url.is_empty() {
            return Err(ConfigurationError::EmptyUrl);
        }

        let url = Url::parse(url).map_err(|source| ConfigurationError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        if options.success_threshold < 1 {
            return Err(ConfigurationError::ZeroSuccessThreshold);
        }

        if options.status_codes.is_empty() {
            return Err(ConfigurationError::NoStatusCodes);
        }

        let status_codes = options
            .status_codes
            .iter()
            .map(|&code| {
                StatusCode::from_u16(code)
                    .map_err(|_| ConfigurationError::InvalidStatusCode { code })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut request_headers = HeaderMap::new();
        request_headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );
        for spec in &options.request_headers {
            let name = parse_header_name(&spec.name)?;
            let value = HeaderValue::from_str(&spec.value).map_err(|_| {
                ConfigurationError::InvalidHeaderValue {
                    name: spec.name.clone(),
                }
            })?;
            request_headers.insert(name, value);
        }

        let required_headers = options
            .required_headers
            .iter()
            .map(|spec| Ok((parse_header_name(&spec.name)?, spec.value.clone())))
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        Ok(ProbePlan {
            url,
            request_headers,
            expectations: Expectations {
                required_headers,
                required_snippets: options.required_snippets.clone(),
                status_codes,
            },
            initial_delay: options.initial_delay,
            interval: options.interval,
            request_timeout: options.request_timeout,
            timeout: options.timeout,
            success_threshold: options.success_threshold,
            quiet: options.quiet,
        })
    }

    /// Builds the request for one attempt.
    pub fn request(&self) -> ProbeRequest {
        ProbeRequest {
            url: self.url.clone(),
            headers: self.request_headers.clone(),
        }
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigurationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigurationError::InvalidHeaderName {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeaderSpec;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_with_defaults() {
        let plan = ProbePlan::new("http://localhost:8080/health", &WaitOptions::default()).unwrap();

        assert_eq!(plan.url.as_str(), "http://localhost:8080/health");
        assert_eq!(plan.expectations.status_codes, vec![StatusCode::OK]);
        assert_eq!(plan.success_threshold, 1);
        assert_eq!(
            plan.request_headers.get(header::USER_AGENT).unwrap(),
            DEFAULT_USER_AGENT
        );
    }

    #[test]
    fn test_new_empty_url() {
        let result = ProbePlan::new("", &WaitOptions::default());
        assert!(matches!(result, Err(ConfigurationError::EmptyUrl)));
    }

    #[test]
    fn test_new_invalid_url() {
        let result = ProbePlan::new("not a url", &WaitOptions::default());
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_new_relative_url() {
        let result = ProbePlan::new("/health", &WaitOptions::default());
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_new_zero_success_threshold() {
        let options = WaitOptions::builder().success_threshold(0).build();
        let result = ProbePlan::new("http://localhost/", &options);
        assert!(matches!(
            result,
            Err(ConfigurationError::ZeroSuccessThreshold)
        ));
    }

    #[test]
    fn test_new_no_status_codes() {
        let options = WaitOptions::builder().status_codes(vec![]).build();
        let result = ProbePlan::new("http://localhost/", &options);
        assert!(matches!(result, Err(ConfigurationError::NoStatusCodes)));
    }

    #[test]
    fn test_new_invalid_status_code() {
        let options = WaitOptions::builder().status_codes(vec![200, 1000]).build();
        let result = ProbePlan::new("http://localhost/", &options);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidStatusCode { code: 1000 })
        ));
    }

    #[test]
    fn test_new_custom_user_agent_overrides_default() {
        let options = WaitOptions::builder()
            .request_headers(vec![HeaderSpec::new("User-Agent", "deploy-bot/2")])
            .build();
        let plan = ProbePlan::new("http://localhost/", &options).unwrap();

        assert_eq!(
            plan.request_headers.get(header::USER_AGENT).unwrap(),
            "deploy-bot/2"
        );
        assert_eq!(plan.request_headers.len(), 1);
    }

    #[test]
    fn test_new_merges_request_headers() {
        let options = WaitOptions::builder()
            .request_headers(vec![
                HeaderSpec::new("accept", "text/html"),
                HeaderSpec::new("authorization", "Bearer token"),
            ])
            .build();
        let plan = ProbePlan::new("http://localhost/", &options).unwrap();

        assert_eq!(plan.request_headers.get("accept").unwrap(), "text/html");
        assert_eq!(
            plan.request_headers.get("authorization").unwrap(),
            "Bearer token"
        );
        assert!(plan.request_headers.contains_key(header::USER_AGENT));
    }

    #[test]
    fn test_new_invalid_request_header_name() {
        let options = WaitOptions::builder()
            .request_headers(vec![HeaderSpec::new("bad header", "value")])
            .build();
        let result = ProbePlan::new("http://localhost/", &options);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidHeaderName { .. })
        ));
    }

    #[test]
    fn test_new_invalid_request_header_value() {
        let options = WaitOptions::builder()
            .request_headers(vec![HeaderSpec::new("x-note", "line\nbreak")])
            .build();
        let result = ProbePlan::new("http://localhost/", &options);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidHeaderValue { .. })
        ));
    }

    #[test]
    fn test_new_invalid_required_header_name() {
        let options = WaitOptions::builder()
            .required_headers(vec![HeaderSpec::new("bad header", "value")])
            .build();
        let result = ProbePlan::new("http://localhost/", &options);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidHeaderName { .. })
        ));
    }

    #[test]
    fn test_request_carries_url_and_headers() {
        let plan = ProbePlan::new("http://localhost/ready", &WaitOptions::default()).unwrap();
        let request = plan.request();

        assert_eq!(request.url, plan.url);
        assert_eq!(request.headers, plan.request_headers);
    }
}
