//! Device location resolution.
//!
//! The countdown needs the caller's coordinates exactly once per session.
//! A failure is surfaced directly: there is no retry and no fallback to a
//! default location.
//!
//! # Example
//!
//! ```
//! use iftar::location::{LocationProvider, StaticLocationProvider};
//! use iftar::types::Coordinates;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StaticLocationProvider::new(Some(Coordinates::new(41.01, 28.97)));
//! let coords = provider.current_position().await?;
//! assert_eq!(coords.latitude, 41.01);
//! # Ok(())
//! # }
//! ```

pub mod error;

use tracing::debug;

pub use error::LocationError;

use crate::types::Coordinates;

#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Location capability backed by user-supplied coordinates.
///
/// `None` models a host without any geolocation capability.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationProvider {
    coordinates: Option<Coordinates>,
}

impl StaticLocationProvider {
    #[must_use]
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }

    /// Builds a provider from an optional latitude/longitude pair.
    ///
    /// Both halves are required; a lone latitude or longitude counts as
    /// no capability.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let coordinates = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        };
        Self { coordinates }
    }
}

impl LocationProvider for StaticLocationProvider {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let coords = self.coordinates.ok_or(LocationError::Unavailable)?;
        coords
            .validate()
            .map_err(LocationError::InvalidCoordinates)?;
        debug!("Resolved location: {}", coords);
        Ok(coords)
    }
}

#[derive(Debug)]
pub struct MockLocationProvider {
    result: std::sync::Mutex<Result<Coordinates, LocationError>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockLocationProvider {
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            result: std::sync::Mutex::new(Ok(coordinates)),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn failing(error: LocationError) -> Self {
        Self {
            result: std::sync::Mutex::new(Err(error)),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn set_result(&self, result: Result<Coordinates, LocationError>) {
        *self.result.lock().unwrap() = result;
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl LocationProvider for MockLocationProvider {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_coordinates() {
        let provider = StaticLocationProvider::new(Some(Coordinates::new(21.42, 39.82)));
        let coords = provider.current_position().await.unwrap();
        assert_eq!(coords, Coordinates::new(21.42, 39.82));
    }

    #[tokio::test]
    async fn test_static_provider_without_capability() {
        let provider = StaticLocationProvider::default();
        let err = provider.current_position().await.unwrap_err();
        assert_eq!(err, LocationError::Unavailable);
    }

    #[tokio::test]
    async fn test_static_provider_rejects_out_of_range() {
        let provider = StaticLocationProvider::new(Some(Coordinates::new(120.0, 0.0)));
        let err = provider.current_position().await.unwrap_err();
        assert!(matches!(err, LocationError::InvalidCoordinates(_)));
    }

    #[tokio::test]
    async fn test_from_parts_requires_both() {
        let provider = StaticLocationProvider::from_parts(Some(10.0), None);
        assert!(provider.current_position().await.unwrap_err().is_unavailable());

        let provider = StaticLocationProvider::from_parts(Some(10.0), Some(20.0));
        assert!(provider.current_position().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_provider_counts_calls() {
        let mock = MockLocationProvider::failing(LocationError::Platform("denied".into()));
        assert!(mock.current_position().await.is_err());

        mock.set_result(Ok(Coordinates::new(1.0, 2.0)));
        assert_eq!(
            mock.current_position().await.unwrap(),
            Coordinates::new(1.0, 2.0)
        );
        assert_eq!(mock.call_count(), 2);
    }
}
