//! Best-effort country lookup.
//!
//! The country only selects a calculation method, so every failure here is
//! swallowed: the caller gets `None` and falls back to the default method.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ServiceConfig;

use super::error::PrayerTimesError;

#[allow(async_fn_in_trait)]
pub trait CountryLookup {
    async fn country_code(&self) -> Option<String>;
}

/// Response of the ip-api.com JSON endpoint.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(rename = "countryCode", default)]
    country_code: Option<String>,
}

/// Looks the country up from the caller's public IP address.
#[derive(Debug, Clone)]
pub struct IpApiCountryLookup {
    client: Client,
    url: String,
}

impl IpApiCountryLookup {
    /// Creates a lookup against the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, PrayerTimesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("iftar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PrayerTimesError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.country_lookup_url.clone(),
        })
    }

    async fn lookup(&self) -> Result<Option<String>, String> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status().as_u16()));
        }

        let body: IpApiResponse = response.json().await.map_err(|e| e.to_string())?;
        if body.status != "success" {
            return Err(format!("lookup status '{}'", body.status));
        }

        Ok(normalize_country(body.country_code))
    }
}

impl CountryLookup for IpApiCountryLookup {
    async fn country_code(&self) -> Option<String> {
        match self.lookup().await {
            Ok(code) => {
                debug!("Country lookup result: {:?}", code);
                code
            }
            Err(e) => {
                warn!("Country lookup failed, using default method: {}", e);
                None
            }
        }
    }
}

/// A country chosen by the user instead of looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCountry(Option<String>);

impl FixedCountry {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(normalize_country(Some(code.into())))
    }
}

impl CountryLookup for FixedCountry {
    async fn country_code(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Country source selected from configuration.
#[derive(Debug, Clone)]
pub enum CountrySource {
    Fixed(FixedCountry),
    IpApi(IpApiCountryLookup),
}

impl CountrySource {
    /// Uses the override when present, the IP lookup otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the IP lookup client cannot be built.
    pub fn from_config(
        country: Option<&str>,
        service: &ServiceConfig,
    ) -> Result<Self, PrayerTimesError> {
        match country {
            Some(code) => Ok(Self::Fixed(FixedCountry::new(code))),
            None => Ok(Self::IpApi(IpApiCountryLookup::new(service)?)),
        }
    }
}

impl CountryLookup for CountrySource {
    async fn country_code(&self) -> Option<String> {
        match self {
            Self::Fixed(fixed) => fixed.country_code().await,
            Self::IpApi(lookup) => lookup.country_code().await,
        }
    }
}

fn normalize_country(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
}

#[derive(Debug, Default)]
pub struct MockCountryLookup {
    code: std::sync::Mutex<Option<String>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockCountryLookup {
    #[must_use]
    pub fn new(code: Option<&str>) -> Self {
        Self {
            code: std::sync::Mutex::new(code.map(String::from)),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl CountryLookup for MockCountryLookup {
    async fn country_code(&self) -> Option<String> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.code.lock().unwrap().clone()
    }
}
