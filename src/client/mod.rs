use crate::http::HttpConnector;
use crate::models::{ProbeEvent, ProbePlan};
use crate::report::{NullReporter, ProbeReporter};

mod wait_for_response;

/// The main entry point for waiting on an HTTP endpoint.
///
/// `Client` owns the transport the requests go through and a reporter the
/// poll loop delivers progress events to. It is generic over the transport so
/// the loop can be exercised without sockets.
///
/// # Examples
///
/// See the [module-level documentation](crate) for a complete example.
pub struct Client<T = HttpConnector> {
    transport: T,
    reporter: Box<dyn ProbeReporter>,
}

impl<T> Client<T> {
    /// Creates a new client that discards progress events.
    ///
    /// # Arguments
    ///
    /// * `transport` - An HTTP transport, typically an
    ///   [`HttpConnector`](crate::http::HttpConnector)
    pub fn new(transport: T) -> Client<T> {
        Client {
            transport,
            reporter: Box::new(NullReporter),
        }
    }

    /// Creates a new client with a custom reporter.
    ///
    /// The CLI uses this to install a console reporter; tests use it to
    /// capture the event stream.
    pub fn with_reporter(transport: T, reporter: Box<dyn ProbeReporter>) -> Client<T> {
        Client {
            transport,
            reporter,
        }
    }

    fn emit(&self, plan: &ProbePlan, event: ProbeEvent) {
        if !plan.quiet {
            self.reporter.report(&event);
        }
    }
}
