use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::client::Client;
use crate::http::HttpFetch;
use crate::models::{ConfigurationError, ProbeEvent, ProbePlan, WaitOptions, WaitStatus};

enum AttemptOutcome {
    Success,
    Failure,
}

impl<T: HttpFetch> Client<T> {
    /// Polls `url` until the response meets the configured expectations, or
    /// until the overall timeout elapses.
    ///
    /// Attempt start times are spaced by `options.interval`; an attempt that
    /// takes longer than the interval is followed immediately by the next
    /// one. A response passes when every required header matches, every
    /// required snippet appears in the body, and the status code is among the
    /// accepted ones — in that order, first failing check wins. The wait
    /// succeeds once `options.success_threshold` consecutive attempts pass.
    ///
    /// Failed requests (connection refused, DNS failure, exceeded redirect
    /// limit, per-request timeout) are never fatal; they reset the success
    /// count and the loop retries. Only an invalid configuration returns an
    /// error, and it does so before any request is issued.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to poll
    /// * `options` - Expectations and timing configuration
    ///
    /// # Returns
    ///
    /// `Ok(WaitStatus::Ready)` when the expectations were met,
    /// `Ok(WaitStatus::TimedOut)` when the overall timeout elapsed first, or
    /// `Err(ConfigurationError)` when the URL or options are invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use upwait::{Client, http::HttpConnector, models::WaitOptions};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let options = WaitOptions::builder()
    ///     .required_snippets(vec!["ok".to_string()])
    ///     .build();
    ///
    /// let client = Client::new(HttpConnector::new(&options)?);
    /// let status = client
    ///     .wait_for_response("http://127.0.0.1:8080/health", options)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for_response(
        &self,
        url: &str,
        options: WaitOptions,
    ) -> Result<WaitStatus, ConfigurationError> {
        let plan = ProbePlan::new(url, &options)?;

        // The initial delay runs before the overall clock starts, so it does
        // not consume the timeout budget.
        if !plan.initial_delay.is_zero() {
            self.emit(
                &plan,
                ProbeEvent::InitialDelay {
                    delay: plan.initial_delay,
                },
            );
            time::sleep(plan.initial_delay).await;
        }

        // The overall deadline owns the whole attempt/pacing loop. When it
        // fires, the in-flight attempt is dropped, which cancels the
        // underlying request through its token guard.
        match time::timeout(plan.timeout, self.poll_until_expected(&plan)).await {
            Ok(status) => Ok(status),
            Err(_) => {
                self.emit(&plan, ProbeEvent::ReachedTimeout);
                Ok(WaitStatus::TimedOut)
            }
        }
    }

    async fn poll_until_expected(&self, plan: &ProbePlan) -> WaitStatus {
        let started = time::Instant::now();
        let mut consecutive_successes: u32 = 0;
        let mut attempt: u64 = 0;

        loop {
            let attempt_started = time::Instant::now();

            // The enclosing timeout normally fires first; this covers a zero
            // timeout and a pacing sleep that ends exactly at the deadline.
            if started.elapsed() >= plan.timeout {
                self.emit(plan, ProbeEvent::ReachedTimeout);
                return WaitStatus::TimedOut;
            }

            attempt += 1;
            self.emit(plan, ProbeEvent::AttemptStarted { attempt });

            match self.attempt(plan).await {
                AttemptOutcome::Success => {
                    consecutive_successes += 1;
                    if consecutive_successes >= plan.success_threshold {
                        self.emit(plan, ProbeEvent::ExpectationMet);
                        return WaitStatus::Ready;
                    }
                }
                AttemptOutcome::Failure => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt, "attempt failed, retrying");
                    consecutive_successes = 0;
                }
            }

            // Space attempt starts by the interval. A slow attempt (including
            // one that burned its per-request cap) eats into the pause.
            let pause = plan.interval.saturating_sub(attempt_started.elapsed());
            if !pause.is_zero() {
                time::sleep(pause).await;
            }
        }
    }

    async fn attempt(&self, plan: &ProbePlan) -> AttemptOutcome {
        let cancel = CancellationToken::new();
        // Dropping the attempt for any reason cancels the in-flight request.
        let _guard = cancel.clone().drop_guard();

        let fetch = self.transport.fetch(plan.request(), cancel);

        let resolved = match plan.request_timeout {
            Some(limit) => match time::timeout(limit, fetch).await {
                Ok(resolved) => resolved,
                Err(_) => {
                    self.emit(plan, ProbeEvent::RequestTimedOut { limit });
                    return AttemptOutcome::Failure;
                }
            },
            None => fetch.await,
        };

        match resolved {
            Ok(response) => {
                self.emit(
                    plan,
                    ProbeEvent::ResponseReceived {
                        status: response.status,
                    },
                );

                match plan.expectations.evaluate(&response) {
                    None => AttemptOutcome::Success,
                    Some(failure) => {
                        self.emit(plan, ProbeEvent::CheckFailed { failure });
                        AttemptOutcome::Failure
                    }
                }
            }
            Err(error) => {
                self.emit(
                    plan,
                    ProbeEvent::RequestFailed {
                        message: error.to_string(),
                    },
                );
                AttemptOutcome::Failure
            }
        }
    }
}
