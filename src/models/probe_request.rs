use reqwest::header::HeaderMap;
use url::Url;

/// A single request the transport is asked to perform: the target URL plus
/// the fully merged header map. A fresh value is built for every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub url: Url,
    pub headers: HeaderMap,
}
