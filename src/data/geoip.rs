use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http_client;
use crate::domain::weather::{LocationRecord, Provenance};

const IPAPI_URL: &str = "https://ipapi.co/json/";
const IP_API_URL: &str = "http://ip-api.com/json/";
const GEOIP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLocation {
    pub location: LocationRecord,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeoIpClient {
    client: Client,
    urls: [String; 2],
}

impl Default for GeoIpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoIpClient {
    pub fn new() -> Self {
        Self::with_base_urls(IPAPI_URL, IP_API_URL)
    }

    pub fn with_base_urls(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(GEOIP_TIMEOUT_SECS)),
            urls: [primary.into(), fallback.into()],
        }
    }

    /// Tries each lookup service in turn; `None` when all of them fail.
    pub async fn detect(&self) -> Option<DetectedLocation> {
        for url in &self.urls {
            match self.lookup(url).await {
                Ok(Some(found)) => return Some(found),
                Ok(None) => debug!(url, "ip lookup returned no coordinates"),
                Err(err) => warn!(url, error = %err, "ip lookup failed"),
            }
        }
        None
    }

    async fn lookup(&self, url: &str) -> Result<Option<DetectedLocation>> {
        let payload: IpLookupResponse = self
            .client
            .get(url)
            .send()
            .await
            .context("ip lookup request failed")?
            .error_for_status()
            .context("ip lookup returned non-success status")?
            .json()
            .await
            .context("failed to decode ip lookup response")?;

        Ok(payload.into_detected())
    }
}

/// Union of the ipapi.co and ip-api.com field names. Both services send a
/// `region`/`country` that may be a code, so the long names win.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpLookupResponse {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
    #[serde(alias = "city_name")]
    city: Option<String>,
    region: Option<String>,
    #[serde(alias = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
    country_name: Option<String>,
    #[serde(alias = "countryCode")]
    country_code: Option<String>,
}

impl IpLookupResponse {
    fn into_detected(self) -> Option<DetectedLocation> {
        let latitude = self.latitude?;
        let longitude = self.longitude?;
        let name = self.display_name();
        Some(DetectedLocation {
            location: LocationRecord::new(latitude, longitude, name, Provenance::Ip),
            country_code: self
                .country_code
                .filter(|code| !code.is_empty())
                .map(|code| code.to_ascii_lowercase()),
        })
    }

    fn display_name(&self) -> String {
        let city = self.city.as_deref().filter(|c| !c.is_empty());
        let region = self
            .region_name
            .as_deref()
            .or(self.region.as_deref())
            .filter(|r| !r.is_empty() && Some(*r) != city);
        let country = self
            .country_name
            .as_deref()
            .or(self.country.as_deref())
            .filter(|c| !c.is_empty());

        let parts: Vec<&str> = [city, region, country].into_iter().flatten().collect();
        if parts.is_empty() {
            "Current Location".to_string()
        } else {
            parts.join(", ")
        }
    }
}
