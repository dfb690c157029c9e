//! Command definitions for the iftar CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, ConfigError};
use crate::types::Language;

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown to the next suhoor or iftar boundary
#[derive(Parser, Debug)]
#[command(
    name = "iftar",
    version,
    about = "Countdown to the next suhoor (Fajr) or iftar (Maghrib)",
    long_about = "Fetches today's prayer times for your location and counts down to the\n\
                  next fast boundary, with a notification when it is reached.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show today's Fajr and Maghrib times
    Times(LocationArgs),

    /// Print the next boundary and the time left once
    Next(NextArgs),

    /// Run the live countdown until Ctrl-C
    Countdown(LocationArgs),

    /// Show the calculation method chosen for a country
    Method(LocationArgs),

    /// Ask for notification permission
    NotifyPermission(LocationArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Shared Arguments
// ============================================================================

/// Location and service overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Latitude in decimal degrees (-90..=90)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (-180..=180)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// ISO 3166-1 alpha-2 country code; skips the IP lookup
    #[arg(long, value_parser = validate_country)]
    pub country: Option<String>,

    /// Language of boundary labels and notifications (en, ru, tr)
    #[arg(long)]
    pub lang: Option<Language>,

    /// Disable boundary notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Base URL of the prayer-times service
    #[arg(long, value_name = "URL")]
    pub prayer_times_url: Option<String>,

    /// URL of the IP country lookup
    #[arg(long, value_name = "URL")]
    pub country_lookup_url: Option<String>,
}

impl LocationArgs {
    /// Applies the flags on top of a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged configuration is invalid.
    pub fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(lat) = self.lat {
            config.latitude = Some(lat);
        }
        if let Some(lon) = self.lon {
            config.longitude = Some(lon);
        }
        if let Some(country) = &self.country {
            config.country = Some(country.clone());
        }
        if let Some(lang) = self.lang {
            config.language = lang;
        }
        if self.no_notify {
            config.notifications = false;
        }
        if let Some(url) = &self.prayer_times_url {
            config.service.prayer_times_url = url.clone();
        }
        if let Some(url) = &self.country_lookup_url {
            config.service.country_lookup_url = url.clone();
        }
        config.validate()
    }
}

/// Arguments for the next command
#[derive(Args, Debug, Clone, Default)]
pub struct NextArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Evaluate at this local time instead of now (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = parse_local_datetime)]
    pub now: Option<NaiveDateTime>,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates and normalizes a country code.
fn validate_country(s: &str) -> Result<String, String> {
    let code = s.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("country must be a two-letter code such as TR".to_string());
    }
    Ok(code.to_ascii_uppercase())
}

/// Parses a local date-time with optional seconds.
fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("invalid time '{s}' (expected YYYY-MM-DDTHH:MM[:SS])"))
}

// ============================================================================
// Tests
// ============================================================================
