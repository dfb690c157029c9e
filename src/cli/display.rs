//! Display utilities for the iftar CLI.
//!
//! Formatting is kept in pure `format_*` helpers so it can be tested; the
//! `show_*` functions only print.

use std::io::Write;
use std::time::Duration;

use crate::prayer::LoadedTimings;
use crate::schedule::format_time_remaining;
use crate::types::{
    BoundaryKind, CalculationMethod, Language, LoadStatus, NextEvent, PermissionState,
};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows today's timings.
    pub fn show_timings(loaded: &LoadedTimings) {
        println!("{}", Self::format_timings(loaded));
    }

    /// Shows the next boundary and the time left.
    pub fn show_next(next: NextEvent, remaining: Duration, language: Language) {
        println!("{}", Self::format_next(next, remaining, language));
    }

    /// Shows a load status transition.
    pub fn show_status(status: &LoadStatus) {
        eprintln!("{}", Self::format_status(status));
    }

    /// Shows the target the countdown is running towards.
    pub fn show_target(next: NextEvent, language: Language) {
        println!(
            "Counting down to {} ({}) at {}",
            next.kind.label(language),
            next.kind.prayer_name(),
            next.at.format("%Y-%m-%d %H:%M")
        );
    }

    /// Redraws the live countdown line in place.
    pub fn show_countdown_tick(remaining: Duration, next: NextEvent, language: Language) {
        let mut stdout = std::io::stdout().lock();
        let line = Self::format_countdown_line(remaining, next, language);
        let _ = write!(stdout, "\r{}", line);
        let _ = stdout.flush();
    }

    /// Shows that a boundary was reached.
    pub fn show_expired(kind: BoundaryKind, language: Language) {
        println!("\n* {} time: {}", kind.prayer_name(), kind.label(language));
    }

    /// Shows the chosen calculation method.
    pub fn show_method(country: Option<&str>, method: CalculationMethod) {
        println!("{}", Self::format_method(country, method));
    }

    /// Shows the notification permission state.
    pub fn show_permission(state: PermissionState) {
        let message = match state {
            PermissionState::Granted => "Notifications are enabled",
            PermissionState::Denied => "Notifications are disabled",
            PermissionState::NotYetAsked => "Notification permission has not been decided",
        };
        println!("{}", message);
    }

    /// Shows that the countdown was stopped.
    pub fn show_stopped() {
        println!("\nCountdown stopped");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Shows a hint for resolving the last error.
    pub fn show_suggestion(suggestion: &str) {
        eprintln!("  hint: {}", suggestion);
    }

    fn format_status(status: &LoadStatus) -> String {
        match status {
            LoadStatus::Loading => "Loading prayer times...".to_string(),
            LoadStatus::Error(message) => format!("Error: {}", message),
            LoadStatus::Ready => "Prayer times loaded".to_string(),
        }
    }

    fn format_timings(loaded: &LoadedTimings) -> String {
        let timings = &loaded.timings;
        let method = match timings.method_id {
            Some(id) => format!("{} (#{})", timings.method_name, id),
            None => loaded.method.to_string(),
        };
        let mut lines = vec![
            format!("Prayer times for {}", timings.readable_date),
            "─────────────────────────────".to_string(),
            format!("Location: {}", loaded.coordinates),
        ];
        if let Some(country) = &loaded.country {
            lines.push(format!("Country:  {}", country));
        }
        lines.push(format!("Method:   {}", method));
        if !timings.timezone.is_empty() {
            lines.push(format!("Timezone: {}", timings.timezone));
        }
        lines.push(format!("Fajr:     {}", timings.fajr.format("%H:%M")));
        lines.push(format!("Maghrib:  {}", timings.maghrib.format("%H:%M")));
        lines.join("\n")
    }

    fn format_next(next: NextEvent, remaining: Duration, language: Language) -> String {
        format!(
            "Next: {} ({}) at {}\nRemaining: {}",
            next.kind.label(language),
            next.kind.prayer_name(),
            next.at.format("%Y-%m-%d %H:%M"),
            format_time_remaining(remaining)
        )
    }

    fn format_countdown_line(remaining: Duration, next: NextEvent, language: Language) -> String {
        format!(
            "{} until {}",
            format_time_remaining(remaining),
            next.kind.label(language)
        )
    }

    fn format_method(country: Option<&str>, method: CalculationMethod) -> String {
        let country = country.unwrap_or("unknown");
        format!("Country: {}\nMethod:  {}", country, method)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, DailyTimings};
    use chrono::{NaiveDate, NaiveTime};

    fn loaded() -> LoadedTimings {
        LoadedTimings {
            coordinates: Coordinates::new(41.0082, 28.9784),
            country: Some("TR".to_string()),
            method: CalculationMethod(13),
            timings: DailyTimings {
                fajr: NaiveTime::from_hms_opt(5, 30, 0).unwrap(),
                maghrib: NaiveTime::from_hms_opt(19, 15, 0).unwrap(),
                readable_date: "01 Mar 2025".to_string(),
                timezone: "Europe/Istanbul".to_string(),
                method_name: "Diyanet İşleri Başkanlığı, Turkey".to_string(),
                method_id: Some(13),
            },
        }
    }

    fn iftar_at(h: u32, m: u32) -> NextEvent {
        NextEvent {
            kind: BoundaryKind::Iftar,
            at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        }
    }

    // ------------------------------------------------------------------------
    // Timings Tests
    // ------------------------------------------------------------------------

    mod timings_tests {
        use super::*;

        #[test]
        fn test_format_timings() {
            let text = Display::format_timings(&loaded());
            assert!(text.contains("Prayer times for 01 Mar 2025"));
            assert!(text.contains("Location: 41.0082, 28.9784"));
            assert!(text.contains("Country:  TR"));
            assert!(text.contains("Method:   Diyanet İşleri Başkanlığı, Turkey (#13)"));
            assert!(text.contains("Timezone: Europe/Istanbul"));
            assert!(text.contains("Fajr:     05:30"));
            assert!(text.contains("Maghrib:  19:15"));
        }

        #[test]
        fn test_format_timings_without_service_method() {
            let mut loaded = loaded();
            loaded.country = None;
            loaded.method = CalculationMethod::DEFAULT;
            loaded.timings.method_id = None;
            loaded.timings.timezone = String::new();

            let text = Display::format_timings(&loaded);
            assert!(!text.contains("Country:"));
            assert!(!text.contains("Timezone:"));
            assert!(text.contains(&format!("Method:   {}", CalculationMethod::DEFAULT)));
        }
    }

    // ------------------------------------------------------------------------
    // Countdown Tests
    // ------------------------------------------------------------------------

    mod countdown_tests {
        use super::*;

        #[test]
        fn test_format_next() {
            let text = Display::format_next(
                iftar_at(19, 15),
                Duration::from_secs(7 * 3600 + 900),
                Language::En,
            );
            assert_eq!(
                text,
                "Next: iftar (Maghrib) at 2025-03-01 19:15\nRemaining: 07:15:00"
            );
        }

        #[test]
        fn test_format_countdown_line() {
            let line = Display::format_countdown_line(
                Duration::from_secs(59),
                iftar_at(19, 15),
                Language::En,
            );
            assert_eq!(line, "00:00:59 until iftar");
        }

        #[test]
        fn test_format_countdown_line_follows_language() {
            let remaining = Duration::from_secs(59);
            let ru = Display::format_countdown_line(remaining, iftar_at(19, 15), Language::Ru);
            assert_eq!(ru, "00:00:59 until ифтар");

            let next = NextEvent {
                kind: BoundaryKind::Suhoor,
                ..iftar_at(5, 30)
            };
            let tr = Display::format_countdown_line(remaining, next, Language::Tr);
            assert_eq!(tr, "00:00:59 until sahurun sonu");
        }

        #[test]
        fn test_format_countdown_line_suhoor() {
            let next = NextEvent {
                kind: BoundaryKind::Suhoor,
                ..iftar_at(5, 30)
            };
            let line = Display::format_countdown_line(Duration::ZERO, next, Language::En);
            assert_eq!(line, "00:00:00 until end of suhoor");
        }
    }

    // ------------------------------------------------------------------------
    // Status Tests
    // ------------------------------------------------------------------------

    mod status_tests {
        use super::*;

        #[test]
        fn test_format_status() {
            assert_eq!(
                Display::format_status(&LoadStatus::Loading),
                "Loading prayer times..."
            );
            assert_eq!(
                Display::format_status(&LoadStatus::Ready),
                "Prayer times loaded"
            );
            assert_eq!(
                Display::format_status(&LoadStatus::Error("service unreachable".to_string())),
                "Error: service unreachable"
            );
        }
    }

    // ------------------------------------------------------------------------
    // Method Tests
    // ------------------------------------------------------------------------

    mod method_tests {
        use super::*;

        #[test]
        fn test_format_method_known_country() {
            let text = Display::format_method(Some("TR"), CalculationMethod(13));
            assert!(text.starts_with("Country: TR\n"));
            assert!(text.contains(&CalculationMethod(13).to_string()));
        }

        #[test]
        fn test_format_method_unknown_country() {
            let text = Display::format_method(None, CalculationMethod::DEFAULT);
            assert!(text.contains("Country: unknown"));
        }
    }
}
