//! Signed Request Example
//!
//! Sends a `POST` carrying an `X-API-Signature` header. Signing is enabled
//! by setting `ECHO_FIVE_API_SECRET`.
//!
//! ## Usage
//!
//! ```bash
//! ECHO_FIVE_API_HOST=api.matthieuroy.be ECHO_FIVE_API_KEY=MY_API_KEY \
//!     ECHO_FIVE_API_SECRET=MY_API_SECRET cargo run --example signed_request
//! ```

use echo_five_api::{ApiClient, ClientConfig, Params};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    if !config.signing_enabled() {
        eprintln!("ECHO_FIVE_API_SECRET is not set; the request will be sent unsigned.");
    }
    let mut api = ApiClient::from_config(config);

    let params = Params::new().with("foo", "Bar").with("biz", "Buz");
    let response = api
        .request("post", "/api/v1/test/signed", &params, "json")
        .await?;
    println!("HTTP {}", response.status_code());

    println!("status:   {}", api.response_status());
    println!("data:     {}", api.response_data());
    println!("messages: {:?}", api.response_messages());

    Ok(())
}
