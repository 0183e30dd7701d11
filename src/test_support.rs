//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::ListViewModel;
use crate::core::theme::ThemeMode;
use crate::source::{Country, CountrySource, FetchError, Region};

/// A bare country: name and region set, everything else empty.
pub fn country(name: &str, region: Region) -> Country {
    Country {
        name: name.to_string(),
        flag: format!("https://flags.test/{}.png", name.to_lowercase()),
        region,
        population: 0,
        languages: BTreeMap::new(),
        currencies: BTreeMap::new(),
        timezones: Vec::new(),
    }
}

/// Creates a fresh view-model in light mode.
pub fn test_view_model() -> ListViewModel {
    ListViewModel::new(ThemeMode::Light)
}

/// A source that replays queued results, then fails.
pub struct StubSource {
    results: Mutex<Vec<Result<Vec<Country>, FetchError>>>,
}

impl StubSource {
    pub fn new(mut results: Vec<Result<Vec<Country>, FetchError>>) -> Self {
        results.reverse();
        Self {
            results: Mutex::new(results),
        }
    }
}

#[async_trait]
impl CountrySource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        self.results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(FetchError::Network("stub exhausted".to_string())))
    }
}
