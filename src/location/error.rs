//! Location resolution error types.

use thiserror::Error;

/// Errors that can occur while resolving the device position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// No geolocation capability is available to this process.
    #[error("location is unavailable: no coordinates were provided")]
    Unavailable,

    /// The provider returned coordinates outside the valid range.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// The underlying provider failed (permission denied, timeout, ...).
    #[error("location request failed: {0}")]
    Platform(String),
}

impl LocationError {
    /// Returns true if the capability itself is missing.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Unavailable => {
                "re-run with --lat and --lon, or set latitude/longitude in the config file"
            }
            Self::InvalidCoordinates(_) => {
                "latitude must be within -90..90 and longitude within -180..180"
            }
            Self::Platform(_) => "check the location source and run the command again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LocationError::Unavailable;
        assert_eq!(
            err.to_string(),
            "location is unavailable: no coordinates were provided"
        );

        let err = LocationError::Platform("timeout".to_string());
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_is_unavailable() {
        assert!(LocationError::Unavailable.is_unavailable());
        assert!(!LocationError::Platform("x".into()).is_unavailable());
    }

    #[test]
    fn test_suggestion() {
        assert!(LocationError::Unavailable.suggestion().contains("--lat"));
        assert!(!LocationError::InvalidCoordinates("x".into())
            .suggestion()
            .is_empty());
    }
}
