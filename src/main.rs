use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use console::style;

use upwait::Client;
use upwait::http::HttpConnector;
use upwait::models::{HeaderSpec, WaitOptions, WaitStatus};
use upwait::report::ConsoleReporter;

/// Waits for an HTTP endpoint to return an expected response.
#[derive(Parser, Debug)]
#[command(name = "upwait", version, about)]
struct Args {
    /// URL to poll until it returns the expected response.
    url: String,

    /// Expected string(s). If multiple strings are provided, then all of them
    /// must be contained in the response.
    #[arg(long, value_name = "SNIPPET", num_args = 1..)]
    contains: Vec<String>,

    /// Defines if redirect responses should be followed automatically.
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    follow_redirect: bool,

    /// Expected header(s) as "<name>: <value>". If multiple headers are
    /// provided, then all of them must be contained in the response.
    #[arg(long, value_name = "HEADER", num_args = 1..)]
    has_header: Vec<HeaderSpec>,

    /// Extra header to include in the request, as "<name>: <value>".
    #[arg(long, value_name = "HEADER", num_args = 1..)]
    header: Vec<HeaderSpec>,

    /// How many seconds to delay the first request.
    #[arg(long, value_name = "SECONDS", value_parser = seconds, default_value = "0")]
    initial_delay: Duration,

    /// How many seconds to sleep between every attempt.
    #[arg(long, value_name = "SECONDS", value_parser = seconds, default_value = "1")]
    interval: Duration,

    /// If exceeded, the request will be aborted.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    max_redirects: usize,

    /// Prepends time to each check output.
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    prepend_time: bool,

    /// Disables any output.
    #[arg(long, default_value_t = false)]
    quiet: bool,

    /// How many seconds to wait for individual requests to complete. If
    /// exceeded, the request is aborted and a new one is started.
    #[arg(long, value_name = "SECONDS", value_parser = seconds, default_value = "5")]
    request_timeout: Duration,

    /// Expected status code(s). If multiple status codes are provided, then
    /// either will be accepted as valid.
    #[arg(long, value_name = "CODE", num_args = 1.., default_value = "200")]
    status_codes: Vec<u16>,

    /// Minimum consecutive successes for the probe to be considered
    /// successful.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    success_threshold: u32,

    /// How many seconds to wait before giving up.
    #[arg(long, value_name = "SECONDS", value_parser = seconds, default_value = "60")]
    timeout: Duration,
}

fn seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("invalid number of seconds \"{value}\""))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("seconds must be a non-negative number, got \"{value}\""))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let options = WaitOptions::builder()
        .follow_redirect(args.follow_redirect)
        .max_redirects(args.max_redirects)
        .request_headers(args.header)
        .required_headers(args.has_header)
        .required_snippets(args.contains)
        .status_codes(args.status_codes)
        .initial_delay(args.initial_delay)
        .interval(args.interval)
        .request_timeout(Some(args.request_timeout))
        .timeout(args.timeout)
        .success_threshold(args.success_threshold)
        .quiet(args.quiet)
        .build();

    let transport = match HttpConnector::new(&options) {
        Ok(transport) => transport,
        Err(error) => {
            report_configuration_error(args.quiet, &error);
            return ExitCode::FAILURE;
        }
    };

    let client = Client::with_reporter(
        transport,
        Box::new(ConsoleReporter::new(args.prepend_time)),
    );

    let wait = client.wait_for_response(&args.url, options);
    let outcome = tokio::select! {
        outcome = wait => outcome,
        _ = tokio::signal::ctrl_c() => {
            return ExitCode::FAILURE;
        }
    };

    // Exit code convention: 0 once the expected response was received, 1 on
    // timeout and on configuration errors.
    match outcome {
        Ok(WaitStatus::Ready) => ExitCode::SUCCESS,
        Ok(WaitStatus::TimedOut) => ExitCode::FAILURE,
        Err(error) => {
            report_configuration_error(args.quiet, &error);
            ExitCode::FAILURE
        }
    }
}

fn report_configuration_error(quiet: bool, error: &dyn std::error::Error) {
    if !quiet {
        eprintln!("{} {error}", style("[configuration error]").red());
    }
}
