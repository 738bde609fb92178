use std::time::Duration;

use anyhow::Result;
use upwait::{
    Client,
    http::HttpConnector,
    models::{HeaderSpec, WaitOptions, WaitStatus},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Require three consecutive passing responses, each carrying a readiness
    // header and a JSON body snippet, before declaring the service up.
    let options = WaitOptions::builder()
        .required_headers(vec![HeaderSpec::new("x-ready", "yes")])
        .required_snippets(vec!["\"status\":\"ok\"".to_string()])
        .success_threshold(3)
        .interval(Duration::from_millis(500))
        .timeout(Duration::from_secs(60))
        .build();

    let client = Client::new(HttpConnector::new(&options)?);

    let status = client
        .wait_for_response("http://127.0.0.1:8080/health", options)
        .await?;

    println!("outcome: {status:?}");
    if !status.is_ready() {
        std::process::exit(1);
    }

    Ok(())
}
