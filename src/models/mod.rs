mod expectations;
mod header_spec;
mod probe_event;
mod probe_plan;
mod probe_request;
mod probe_response;
mod wait_options;
mod wait_status;

pub use expectations::{CheckFailure, Expectations};
pub use header_spec::{HeaderSpec, ParseHeaderSpecError};
pub use probe_event::ProbeEvent;
pub use probe_plan::{ConfigurationError, ProbePlan};
pub use probe_request::ProbeRequest;
pub use probe_response::ProbeResponse;
pub use wait_options::WaitOptions;
pub use wait_status::WaitStatus;
