use reqwest::redirect;
use tokio_util::sync::CancellationToken;

use crate::models::{ProbeRequest, ProbeResponse, WaitOptions};

/// The transport seam the poll loop talks through.
///
/// Implementations must honor the cancellation token: once it fires, the
/// pending fetch must resolve promptly with [`FetchError::Cancelled`] rather
/// than run to completion.
pub trait HttpFetch {
    fn fetch(
        &self,
        request: ProbeRequest,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<ProbeResponse, FetchError>>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The transport failed to complete the exchange: connection refused, DNS
    /// failure, TLS failure, or the redirect limit was exceeded.
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// The cancellation token fired before the exchange completed.
    #[error("request was cancelled")]
    Cancelled,
}

/// The reqwest-backed transport.
///
/// The redirect policy is fixed at construction because reqwest configures
/// redirect handling per client, not per request.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: reqwest::Client,
}

impl HttpConnector {
    /// Builds a connector honoring the redirect settings in `options`.
    pub fn new(options: &WaitOptions) -> Result<HttpConnector, reqwest::Error> {
        let redirect = if options.follow_redirect {
            redirect::Policy::limited(options.max_redirects)
        } else {
            redirect::Policy::none()
        };

        let http = reqwest::Client::builder().redirect(redirect).build()?;

        Ok(HttpConnector { http })
    }
}

impl HttpFetch for HttpConnector {
    async fn fetch(
        &self,
        request: ProbeRequest,
        cancel: CancellationToken,
    ) -> Result<ProbeResponse, FetchError> {
        let exchange = async {
            let response = self
                .http
                .get(request.url)
                .headers(request.headers)
                .send()
                .await?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok(ProbeResponse {
                status,
                headers,
                body,
            })
        };

        tokio::select! {
            outcome = exchange => outcome,
            () = cancel.cancelled() => Err(FetchError::Cancelled),
        }
    }
}
