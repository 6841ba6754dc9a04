//! Simple Request Example
//!
//! Sends an unsigned JSON `POST` and prints the decoded response.
//!
//! ## Usage
//!
//! ```bash
//! ECHO_FIVE_API_HOST=api.matthieuroy.be ECHO_FIVE_API_KEY=MY_API_KEY \
//!     cargo run --example simple_request
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

    let params = Params::new().with("foo", "Bar").with("biz", "Buz");
    api.request("post", "/api/v1/test/simple", &params, "json")
        .await?;

    println!("{:#}", api.response_json());

    Ok(())
}
