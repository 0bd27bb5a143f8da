// API client module: a small blocking HTTP client that fetches country
// metadata from the REST Countries service. It stays synchronous: one
// request, one response, printed and done.

use std::fmt::Write as _;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;

pub const HEADER: &str = "Countries:";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send countries request: {0}")]
    Request(#[source] reqwest::Error),

    /// Non-200 answer. Keeps the raw status code and body text.
    #[error("Request failed. Code: {status}\nMessage: {body}")]
    Status { status: u16, body: String },

    #[error("Parsing countries response json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Nested `name` object; only the common name is used.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CountryName {
    pub common: String,
}

/// One entry of the response array. Every field except the name may be
/// missing for some territories.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    pub region: Option<String>,
    pub population: Option<u64>,
}

impl Country {
    pub fn capital(&self) -> &str {
        self.capital.first().map(String::as_str).unwrap_or("None")
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or("Unknown")
    }

    pub fn population(&self) -> String {
        self.population
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Unknown".into())
    }

    /// Single console line for this country.
    pub fn row(&self) -> String {
        format!(
            "Country: {} | Capital: {} | Region: {} | Population: {}",
            self.name.common,
            self.capital(),
            self.region(),
            self.population()
        )
    }
}

/// Simple API client that holds a reqwest blocking client and the full
/// URL of the countries endpoint.
#[derive(Clone)]
pub struct CountriesClient {
    client: Client,
    url: String,
}

impl CountriesClient {
    /// Create a client from the loaded configuration
    /// (`COUNTRIES_API_URL`, `HTTP_TIMEOUT_SECS`).
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_url(&config.countries_url, config.http_timeout)
    }

    pub fn with_url(url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(CountriesClient {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the endpoint and decode the country list. Any status other than
    /// 200 is returned as [`ApiError::Status`].
    pub fn fetch_countries(&self) -> Result<Vec<Country>, ApiError> {
        tracing::debug!(url = %self.url, "requesting countries");
        let res = self
            .client
            .get(&self.url)
            .send()
            .map_err(ApiError::Request)?;
        let status = res.status();
        let txt = res.text().unwrap_or_else(|_| "".into());
        let countries = decode_countries(status, &txt)?;
        tracing::info!(count = countries.len(), "countries received");
        Ok(countries)
    }
}

/// Turn a raw response into the country list.
pub fn decode_countries(status: StatusCode, body: &str) -> Result<Vec<Country>, ApiError> {
    if status != StatusCode::OK {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Header line followed by at most `limit` country rows.
pub fn render_countries(countries: &[Country], limit: usize) -> String {
    let mut out = format!("{HEADER}\n");
    for country in countries.iter().take(limit) {
        let _ = writeln!(out, "{}", country.row());
    }
    out
}
