//! REST Countries source.
//!
//! A single unauthenticated `GET /all` with a field-selection query. The body
//! is buffered whole and decoded as one JSON array.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::provider::{CountrySource, FetchError};
use super::types::{Country, WireCountry};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested from the endpoint; everything else is dropped server-side.
const FIELDS: &str = "name,flags,region,population,languages,currencies,timezones";

pub struct RestCountriesSource {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        let url = format!("{}/all", self.base_url);
        info!("Fetching country dataset from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("fields", FIELDS)])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("REST Countries response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("REST Countries API error: {} - {}", status, err_body);
            return Err(FetchError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        debug!("Buffered response body: {} bytes", body.len());

        let wire: Vec<WireCountry> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let countries: Vec<Country> = wire.into_iter().map(Country::from).collect();
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }
}
