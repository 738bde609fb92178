use chrono::{DateTime, SecondsFormat, Utc};
use console::style;

use crate::models::ProbeEvent;

/// Receives the events the poll loop emits.
///
/// Installed on the [`Client`](crate::Client); the loop delivers every event
/// here unless the wait was configured as quiet.
pub trait ProbeReporter: Send + Sync {
    fn report(&self, event: &ProbeEvent);
}

/// Discards all events. The default reporter for embedded use.
pub struct NullReporter;

impl ProbeReporter for NullReporter {
    fn report(&self, _event: &ProbeEvent) {}
}

/// Writes one line per event to stderr, colored by event class, optionally
/// prefixed with an RFC 3339 UTC timestamp.
pub struct ConsoleReporter {
    prepend_time: bool,
}

impl ConsoleReporter {
    pub fn new(prepend_time: bool) -> ConsoleReporter {
        ConsoleReporter { prepend_time }
    }

    fn render(&self, event: &ProbeEvent, now: DateTime<Utc>) -> String {
        let line = match event {
            ProbeEvent::InitialDelay { .. } | ProbeEvent::AttemptStarted { .. } => {
                style(event).dim().to_string()
            }
            ProbeEvent::ResponseReceived { .. } => style(event).yellow().to_string(),
            ProbeEvent::CheckFailed { .. }
            | ProbeEvent::RequestFailed { .. }
            | ProbeEvent::RequestTimedOut { .. }
            | ProbeEvent::ReachedTimeout => style(event).red().to_string(),
            ProbeEvent::ExpectationMet => style(event).green().to_string(),
        };

        if self.prepend_time {
            format!(
                "[{}] {line}",
                now.to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        } else {
            line
        }
    }
}

impl ProbeReporter for ConsoleReporter {
    fn report(&self, event: &ProbeEvent) {
        eprintln!("{}", self.render(event, Utc::now()));
    }
}
