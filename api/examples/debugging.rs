//! Debugging Example
//!
//! Wraps a request in debug mode and prints the collected telemetry.
//!
//! ## Usage
//!
//! ```bash
//! ECHO_FIVE_API_HOST=api.matthieuroy.be ECHO_FIVE_API_KEY=MY_API_KEY \
//!     RUST_LOG=echo_five_api=debug cargo run --example debugging
//! ```

use echo_five_api::{ApiClient, Params};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut api = ApiClient::from_env()?;
    api.debug_start();

    let params = Params::new().with("foo", "Bar").with("biz", "Buz");
    api.request("post", "/api/v1/test/simple", &params, "json")
        .await?;

    api.debug_stop();

    println!("{:#}", api.response_json());
    if let Some(report) = api.debug_get() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if let Some(info) = api.request_info() {
        println!("{}", serde_json::to_string_pretty(&info.to_value())?);
    }

    Ok(())
}
