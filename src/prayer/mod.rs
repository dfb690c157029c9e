//! Prayer-time resolution pipeline.
//!
//! Resolving today's timings is a linear chain:
//!
//! ```text
//! LocationProvider ──▶ Coordinates ─────────────────────┐
//!                                                       ▼
//! CountryLookup ──▶ Option<country> ──▶ method ──▶ PrayerTimesSource ──▶ DailyTimings
//! ```
//!
//! The location and the timings fetch are fatal when they fail; the country
//! lookup is best effort and degrades to [`CalculationMethod::DEFAULT`].
//! Only the first failure is reported, later stages are not attempted.

pub mod aladhan;
pub mod country;
pub mod error;
pub mod method;

use thiserror::Error;
use tracing::{debug, info};

pub use aladhan::AladhanClient;
pub use country::{
    CountryLookup, CountrySource, FixedCountry, IpApiCountryLookup, MockCountryLookup,
};
pub use error::PrayerTimesError;
pub use method::{country_methods, method_for_country};

use crate::location::{LocationError, LocationProvider};
use crate::types::{CalculationMethod, Coordinates, DailyTimings};

#[allow(async_fn_in_trait)]
pub trait PrayerTimesSource {
    async fn fetch_timings(
        &self,
        coords: Coordinates,
        method: CalculationMethod,
    ) -> Result<DailyTimings, PrayerTimesError>;
}

/// Failure of one load attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The device position could not be obtained.
    #[error(transparent)]
    LocationUnavailable(#[from] LocationError),

    /// Timings could not be fetched.
    #[error(transparent)]
    PrayerTimesFetch(#[from] PrayerTimesError),
}

impl LoadError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::LocationUnavailable(e) => e.suggestion(),
            Self::PrayerTimesFetch(e) => e.suggestion(),
        }
    }
}

/// Everything one successful load produced.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTimings {
    pub coordinates: Coordinates,
    pub country: Option<String>,
    pub method: CalculationMethod,
    pub timings: DailyTimings,
}

/// Composes location, country lookup and timings fetch.
pub struct PrayerTimeService<L, C, P> {
    location: L,
    country: C,
    source: P,
}

impl<L, C, P> PrayerTimeService<L, C, P>
where
    L: LocationProvider,
    C: CountryLookup,
    P: PrayerTimesSource,
{
    pub fn new(location: L, country: C, source: P) -> Self {
        Self {
            location,
            country,
            source,
        }
    }

    /// Resolves the calculation method from the (best-effort) country.
    pub async fn resolve_method(&self) -> (Option<String>, CalculationMethod) {
        let country = self.country.country_code().await;
        let method = method_for_country(country.as_deref());
        debug!("Country {:?} -> method {}", country, method);
        (country, method)
    }

    /// Fetches today's timings for the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the prayer-times service fails.
    pub async fn fetch_prayer_times(
        &self,
        coords: Coordinates,
    ) -> Result<(Option<String>, CalculationMethod, DailyTimings), PrayerTimesError> {
        let (country, method) = self.resolve_method().await;
        let timings = self.source.fetch_timings(coords, method).await?;
        Ok((country, method, timings))
    }

    /// Runs the full pipeline once.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage: location, then timings fetch.
    pub async fn load(&self) -> Result<LoadedTimings, LoadError> {
        let coordinates = self.location.current_position().await?;
        let (country, method, timings) = self.fetch_prayer_times(coordinates).await?;

        info!(
            "Loaded timings for {} ({}): fajr={} maghrib={}",
            coordinates, timings.readable_date, timings.fajr, timings.maghrib
        );

        Ok(LoadedTimings {
            coordinates,
            country,
            method,
            timings,
        })
    }
}

#[derive(Debug)]
pub struct MockPrayerTimesSource {
    result: std::sync::Mutex<Result<DailyTimings, PrayerTimesError>>,
    requests: std::sync::Mutex<Vec<(Coordinates, CalculationMethod)>>,
}

impl MockPrayerTimesSource {
    #[must_use]
    pub fn new(timings: DailyTimings) -> Self {
        Self {
            result: std::sync::Mutex::new(Ok(timings)),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(error: PrayerTimesError) -> Self {
        Self {
            result: std::sync::Mutex::new(Err(error)),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn requests(&self) -> Vec<(Coordinates, CalculationMethod)> {
        self.requests.lock().unwrap().clone()
    }
}

impl PrayerTimesSource for MockPrayerTimesSource {
    async fn fetch_timings(
        &self,
        coords: Coordinates,
        method: CalculationMethod,
    ) -> Result<DailyTimings, PrayerTimesError> {
        self.requests.lock().unwrap().push((coords, method));
        self.result.lock().unwrap().clone()
    }
}
