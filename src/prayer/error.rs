//! Prayer-times service error types.

use thiserror::Error;

/// Errors that can occur while fetching today's timings.
///
/// Any of these is fatal for the current load: without timings there is
/// nothing to count down to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrayerTimesError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The request did not complete (DNS, connect, timeout, ...).
    #[error("prayer times request failed: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("prayer times service returned HTTP {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("failed to decode prayer times response: {0}")]
    Decode(String),

    /// A timing was not a valid `HH:MM` clock time.
    #[error("invalid clock time '{0}'")]
    InvalidTime(String),
}

impl PrayerTimesError {
    /// Returns true if the failure happened before any response arrived.
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Client(_) | Self::Network(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Client(_) | Self::Network(_) => {
                "check your internet connection and run the command again"
            }
            Self::Status(_) => "the prayer times service is unavailable, try again later",
            Self::Decode(_) | Self::InvalidTime(_) => {
                "the prayer times service sent an unexpected response, try again later"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PrayerTimesError::Status(503).to_string(),
            "prayer times service returned HTTP 503"
        );
        assert!(PrayerTimesError::InvalidTime("25:99".into())
            .to_string()
            .contains("25:99"));
    }

    #[test]
    fn test_is_transport_error() {
        assert!(PrayerTimesError::Network("reset".into()).is_transport_error());
        assert!(!PrayerTimesError::Status(500).is_transport_error());
    }

    #[test]
    fn test_suggestion() {
        assert!(PrayerTimesError::Network("x".into())
            .suggestion()
            .contains("internet"));
        assert!(!PrayerTimesError::Decode("x".into()).suggestion().is_empty());
    }
}
