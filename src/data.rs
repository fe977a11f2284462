pub mod forecast;
pub mod geocode;
pub mod geoip;

use std::time::Duration;

use reqwest::Client;

const USER_AGENT: &str = concat!("environment-reader/", env!("CARGO_PKG_VERSION"));

/// Shared client builder; falls back to a default client if TLS setup fails.
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default http client");
            Client::new()
        })
}
