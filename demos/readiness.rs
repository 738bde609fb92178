use std::time::Duration;

use anyhow::Result;
use upwait::{
    Client,
    http::HttpConnector,
    models::{WaitOptions, WaitStatus},
    report::ConsoleReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Poll a local service until it answers with a 200, checking once per
    // second for up to two minutes.
    let options = WaitOptions::builder()
        .interval(Duration::from_secs(1))
        .timeout(Duration::from_secs(120))
        .build();

    let transport = HttpConnector::new(&options)?;
    let client = Client::with_reporter(transport, Box::new(ConsoleReporter::new(true)));

    match client
        .wait_for_response("http://127.0.0.1:8080/health", options)
        .await?
    {
        WaitStatus::Ready => println!("service is up"),
        WaitStatus::TimedOut => println!("service did not come up in time"),
    }

    Ok(())
}
