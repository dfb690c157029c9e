//! Core data types for the prayer-time countdown.
//!
//! This module defines the data structures used for:
//! - Device coordinates
//! - Calculation methods
//! - Today's boundary timings
//! - The derived next boundary event
//! - Notification permission and session load state

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Coordinates
// ============================================================================

/// Geographic position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (-90..=90)
    pub latitude: f64,
    /// Longitude (-180..=180)
    pub longitude: f64,
}

impl Coordinates {
    /// Creates coordinates without validation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validates the coordinates.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

// ============================================================================
// CalculationMethod
// ============================================================================

/// Identifier of a prayer-time calculation convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationMethod(pub u8);

impl CalculationMethod {
    /// Muslim World League. Used whenever the country is unknown or unmapped.
    pub const DEFAULT: CalculationMethod = CalculationMethod(3);

    /// Returns the numeric id sent to the prayer-times service.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Returns the human-readable name of the convention.
    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "University of Islamic Sciences, Karachi",
            2 => "Islamic Society of North America",
            3 => "Muslim World League",
            4 => "Umm Al-Qura University, Makkah",
            5 => "Egyptian General Authority of Survey",
            7 => "Institute of Geophysics, University of Tehran",
            8 => "Gulf Region",
            9 => "Kuwait",
            10 => "Qatar",
            11 => "Majlis Ugama Islam Singapura, Singapore",
            12 => "Union Organization islamic de France",
            13 => "Diyanet İşleri Başkanlığı, Turkey",
            14 => "Spiritual Administration of Muslims of Russia",
            15 => "Moonsighting Committee Worldwide",
            16 => "Dubai",
            _ => "Custom",
        }
    }
}

impl Default for CalculationMethod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

// ============================================================================
// BoundaryKind
// ============================================================================

/// The two daily boundaries of the fasting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Pre-dawn boundary (fajr). The suhoor meal window closes here.
    Suhoor,
    /// Sunset boundary (maghrib). The iftar meal window opens here.
    Iftar,
}

impl BoundaryKind {
    /// Returns the string representation of the boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Suhoor => "suhoor",
            BoundaryKind::Iftar => "iftar",
        }
    }

    /// Returns the user-facing label of the boundary.
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (BoundaryKind::Suhoor, Language::En) => "end of suhoor",
            (BoundaryKind::Iftar, Language::En) => "iftar",
            (BoundaryKind::Suhoor, Language::Ru) => "конец сухура",
            (BoundaryKind::Iftar, Language::Ru) => "ифтар",
            (BoundaryKind::Suhoor, Language::Tr) => "sahurun sonu",
            (BoundaryKind::Iftar, Language::Tr) => "iftar",
        }
    }

    /// Returns the name of the prayer that marks this boundary.
    pub fn prayer_name(&self) -> &'static str {
        match self {
            BoundaryKind::Suhoor => "Fajr",
            BoundaryKind::Iftar => "Maghrib",
        }
    }
}

// ============================================================================
// DailyTimings
// ============================================================================

/// Today's two boundary times plus descriptive metadata from the service.
///
/// Times are local wall-clock times as returned by the service; no timezone
/// conversion is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTimings {
    /// Fajr (boundary-A) clock time
    pub fajr: NaiveTime,
    /// Maghrib (boundary-B) clock time
    pub maghrib: NaiveTime,
    /// Human-readable date, e.g. "01 Mar 2025"
    pub readable_date: String,
    /// Timezone name reported by the service
    pub timezone: String,
    /// Method name the service actually used
    pub method_name: String,
    /// Method id the service actually used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_id: Option<u8>,
}

// ============================================================================
// NextEvent
// ============================================================================

/// The next boundary to count down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEvent {
    /// Which boundary
    pub kind: BoundaryKind,
    /// Absolute local wall-clock instant of the boundary
    pub at: NaiveDateTime,
}

// ============================================================================
// PermissionState
// ============================================================================

/// Notification permission as mirrored from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// The user has not been asked yet
    #[default]
    NotYetAsked,
    /// Notifications may be displayed
    Granted,
    /// The user refused; terminal for the session
    Denied,
}

impl PermissionState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionState::NotYetAsked => "not_yet_asked",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
        }
    }

    /// Returns true if notifications may be displayed.
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

// ============================================================================
// Language
// ============================================================================

/// Language used for notification texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Tr,
}

impl Language {
    /// Returns the language code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Tr => "tr",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            "tr" => Ok(Language::Tr),
            other => Err(format!("unsupported language '{other}' (expected en, ru or tr)")),
        }
    }
}

// ============================================================================
// LoadStatus
// ============================================================================

/// Lifecycle of one load. The CLI starts loading as soon as a command runs,
/// so there is no idle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Location, country and timings are being resolved
    Loading,
    /// The load failed; carries the user-facing message
    Error(String),
    /// Timings are available and the countdown may run
    Ready,
}

impl LoadStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Loading => "loading",
            LoadStatus::Error(_) => "error",
            LoadStatus::Ready => "ready",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
