//! Client for the AlAdhan prayer-times API.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::ServiceConfig;
use crate::schedule::parse_clock_time;
use crate::types::{CalculationMethod, Coordinates, DailyTimings};

use super::error::PrayerTimesError;
use super::PrayerTimesSource;

/// HTTP client for `GET /v1/timings`.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    client: Client,
    base_url: String,
}

impl AladhanClient {
    /// Creates a client against the configured base URL.
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
            base_url: config.prayer_times_url.trim_end_matches('/').to_string(),
        })
    }

    fn timings_url(&self, coords: Coordinates, method: CalculationMethod) -> String {
        format!(
            "{}/v1/timings?latitude={}&longitude={}&method={}",
            self.base_url,
            coords.latitude,
            coords.longitude,
            method.id()
        )
    }
}

impl PrayerTimesSource for AladhanClient {
    #[instrument(skip(self, method), fields(method = method.id()))]
    async fn fetch_timings(
        &self,
        coords: Coordinates,
        method: CalculationMethod,
    ) -> Result<DailyTimings, PrayerTimesError> {
        let url = self.timings_url(coords, method);
        debug!("Requesting prayer times: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PrayerTimesError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrayerTimesError::Status(status.as_u16()));
        }

        let body: wire::TimingsResponse = response
            .json()
            .await
            .map_err(|e| PrayerTimesError::Decode(e.to_string()))?;

        let timings = body.data.into_daily_timings()?;
        debug!(
            "Received timings for {}: fajr={} maghrib={}",
            timings.readable_date, timings.fajr, timings.maghrib
        );
        Ok(timings)
    }
}

/// Response structures of the timings endpoint.
mod wire {
    use serde::Deserialize;

    use super::{parse_clock_time, DailyTimings, PrayerTimesError};

    #[derive(Debug, Deserialize)]
    pub struct TimingsResponse {
        pub data: TimingsData,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimingsData {
        pub timings: Timings,
        pub date: DateInfo,
        pub meta: Meta,
    }

    #[derive(Debug, Deserialize)]
    pub struct Timings {
        #[serde(rename = "Fajr")]
        pub fajr: String,
        #[serde(rename = "Maghrib")]
        pub maghrib: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct DateInfo {
        pub readable: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Meta {
        #[serde(default)]
        pub timezone: String,
        #[serde(default)]
        pub method: Option<MethodInfo>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MethodInfo {
        #[serde(default)]
        pub id: Option<u8>,
        #[serde(default)]
        pub name: String,
    }

    impl TimingsData {
        pub fn into_daily_timings(self) -> Result<DailyTimings, PrayerTimesError> {
            let fajr = parse_clock_time(&self.timings.fajr)
                .map_err(|_| PrayerTimesError::InvalidTime(self.timings.fajr.clone()))?;
            let maghrib = parse_clock_time(&self.timings.maghrib)
                .map_err(|_| PrayerTimesError::InvalidTime(self.timings.maghrib.clone()))?;
            let (method_id, method_name) = match self.meta.method {
                Some(method) => (method.id, method.name),
                None => (None, String::new()),
            };

            Ok(DailyTimings {
                fajr,
                maghrib,
                readable_date: self.date.readable,
                timezone: self.meta.timezone,
                method_name,
                method_id,
            })
        }
    }
}
