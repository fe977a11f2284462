use std::{sync::OnceLock, time::Duration};

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http_client;
use crate::domain::weather::{LocationRecord, Provenance};

const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const GEOCODE_TIMEOUT_SECS: u64 = 10;
const RESULT_LIMIT: usize = 8;
pub const CURRENT_LOCATION: &str = "Current Location";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl SearchResult {
    /// Postal-code hits ("560001, Bengaluru, ...") show the whole display name.
    pub fn label(&self) -> String {
        let first = self.display_name.split(',').next().unwrap_or_default().trim();
        if is_postal_code(first) {
            return self.display_name.clone();
        }

        let mut parts = vec![self.name.as_str()];
        if let Some(region) = self.region.as_deref().filter(|r| *r != self.name) {
            parts.push(region);
        }
        if let Some(country) = self.country.as_deref() {
            parts.push(country);
        }
        parts.join(", ")
    }

    pub fn into_location(self) -> LocationRecord {
        let label = self.label();
        LocationRecord::new(self.latitude, self.longitude, label, Provenance::Search)
    }
}

fn is_postal_code(value: &str) -> bool {
    static POSTAL: OnceLock<Option<Regex>> = OnceLock::new();
    POSTAL
        .get_or_init(|| Regex::new(r"^\d+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    nominatim_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_urls(GEOCODE_URL, NOMINATIM_URL)
    }

    pub fn with_base_urls(base_url: impl Into<String>, nominatim_url: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(GEOCODE_TIMEOUT_SECS)),
            base_url: base_url.into(),
            nominatim_url: nominatim_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Open-Meteo first; Nominatim when it errors or finds nothing.
    pub async fn search(&self, query: &str, country_code: Option<&str>) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        match self.search_open_meteo(query, country_code).await {
            Ok(results) if !results.is_empty() => return Ok(results),
            Ok(_) => debug!(query, "no open-meteo matches, trying nominatim"),
            Err(err) => warn!(query, error = %err, "open-meteo search failed, trying nominatim"),
        }

        self.search_nominatim(query, country_code).await
    }

    async fn search_open_meteo(
        &self,
        query: &str,
        country_code: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let count = RESULT_LIMIT.to_string();
        let mut request = self.client.get(&self.base_url).query(&[
            ("name", query),
            ("count", count.as_str()),
            ("language", "en"),
            ("format", "json"),
        ]);
        if let Some(code) = country_code {
            request = request.query(&[("countryCode", code.to_ascii_uppercase())]);
        }

        let payload: GeocodeResponse = request
            .send()
            .await
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding request returned non-success status")?
            .json()
            .await
            .context("failed to decode geocoding response")?;

        Ok(rank_results(payload.results.unwrap_or_default(), query, country_code))
    }

    async fn search_nominatim(
        &self,
        query: &str,
        country_code: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let limit = RESULT_LIMIT.to_string();
        let mut request = self
            .client
            .get(format!("{}/search", self.nominatim_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
                ("accept-language", "en"),
            ]);
        if let Some(code) = country_code {
            request = request.query(&[("countrycodes", code)]);
        }

        let places: Vec<NominatimPlace> = request
            .send()
            .await
            .context("nominatim search failed")?
            .error_for_status()
            .context("nominatim search returned non-success status")?
            .json()
            .await
            .context("failed to decode nominatim response")?;

        Ok(places.into_iter().filter_map(NominatimPlace::into_result).collect())
    }

    /// Best-effort place name for raw coordinates.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> String {
        match self.reverse_lookup(latitude, longitude).await {
            Ok(Some(name)) => name,
            Ok(None) => CURRENT_LOCATION.to_string(),
            Err(err) => {
                warn!(error = %err, "reverse geocoding failed");
                CURRENT_LOCATION.to_string()
            }
        }
    }

    async fn reverse_lookup(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let place: NominatimPlace = self
            .client
            .get(format!("{}/reverse", self.nominatim_url))
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .await
            .context("reverse geocoding request failed")?
            .error_for_status()
            .context("reverse geocoding returned non-success status")?
            .json()
            .await
            .context("failed to decode reverse geocoding response")?;

        Ok(place.short_name())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    country_code: Option<String>,
    admin1: Option<String>,
    population: Option<u64>,
}

impl GeocodeResult {
    fn into_result(self) -> SearchResult {
        let display_name = [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        SearchResult {
            name: self.name,
            display_name,
            latitude: self.latitude,
            longitude: self.longitude,
            region: self.admin1,
            country: self.country,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

impl NominatimPlace {
    fn locality(&self) -> Option<&str> {
        let address = self.address.as_ref()?;
        address
            .city
            .as_deref()
            .or(address.town.as_deref())
            .or(address.village.as_deref())
            .or(address.suburb.as_deref())
    }

    fn short_name(&self) -> Option<String> {
        let address = self.address.as_ref();
        let parts: Vec<&str> = [
            self.locality(),
            address.and_then(|a| a.state.as_deref()),
            address.and_then(|a| a.country.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            self.display_name.clone()
        } else {
            Some(parts.join(", "))
        }
    }

    fn into_result(self) -> Option<SearchResult> {
        let latitude = self.lat.as_deref()?.parse().ok()?;
        let longitude = self.lon.as_deref()?.parse().ok()?;
        let display_name = self.display_name.clone()?;
        let name = self
            .locality()
            .map(str::to_string)
            .unwrap_or_else(|| display_name.split(',').next().unwrap_or_default().trim().to_string());
        let address = self.address.unwrap_or_default();
        Some(SearchResult {
            name,
            display_name,
            latitude,
            longitude,
            region: address.state,
            country: address.country,
        })
    }
}

struct ScoredResult {
    result: SearchResult,
    exact_name_match: bool,
    country_match: bool,
    population: u64,
    api_order: usize,
}

fn rank_results(
    results: Vec<GeocodeResult>,
    query: &str,
    country_code: Option<&str>,
) -> Vec<SearchResult> {
    let normalized_query = normalize(query.split(',').next().unwrap_or(query));

    let mut scored: Vec<ScoredResult> = results
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| ScoredResult {
            exact_name_match: normalize(&entry.name) == normalized_query,
            country_match: country_code.is_some_and(|cc| {
                entry
                    .country_code
                    .as_deref()
                    .is_some_and(|country| country.eq_ignore_ascii_case(cc))
            }),
            population: entry.population.unwrap_or_default(),
            api_order: idx,
            result: entry.into_result(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.exact_name_match
            .cmp(&a.exact_name_match)
            .then_with(|| b.country_match.cmp(&a.country_match))
            .then_with(|| b.population.cmp(&a.population))
            .then_with(|| a.api_order.cmp(&b.api_order))
    });

    scored.into_iter().map(|s| s.result).collect()
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
