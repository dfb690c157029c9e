//! Iftar Countdown Library
//!
//! This library provides the core functionality for the iftar CLI.
//! It includes:
//! - Location resolution for the caller's coordinates
//! - Country lookup and calculation-method selection
//! - Prayer-time fetching from the Aladhan service
//! - Next-boundary derivation and the live countdown engine
//! - Boundary notifications with a one-shot permission flow
//! - CLI command parsing, configuration and display utilities

pub mod cli;
pub mod config;
pub mod location;
pub mod notification;
pub mod prayer;
pub mod schedule;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    BoundaryKind, CalculationMethod, Coordinates, DailyTimings, Language, LoadStatus, NextEvent,
    PermissionState,
};

pub use config::{AppConfig, ConfigError, ServiceConfig};

pub use location::{LocationError, LocationProvider, MockLocationProvider, StaticLocationProvider};

pub use prayer::{
    method_for_country, AladhanClient, CountryLookup, CountrySource, LoadError, LoadedTimings,
    MockCountryLookup, MockPrayerTimesSource, PrayerTimeService, PrayerTimesError,
    PrayerTimesSource,
};

pub use schedule::{
    format_time_remaining, next_event, time_remaining, Clock, CountdownEngine, CountdownEvent,
    CountdownHandle, MockClock, SystemClock,
};

pub use notification::{
    MockNotificationFacility, NotificationContent, NotificationError, NotificationFacility,
    PermissionGate, SystemNotifier,
};
