//! Terminal notification backend.
//!
//! Rings the bell and prints a banner on stderr. Permission is tracked in
//! memory for the session only; `--no-notify` answers every request with a
//! denial.

use std::io::Write;
use std::sync::Mutex;

use crate::types::PermissionState;

use super::content::NotificationContent;
use super::error::NotificationError;
use super::NotificationFacility;

#[derive(Debug)]
pub struct TerminalNotifier {
    enabled: bool,
    state: Mutex<PermissionState>,
}

impl TerminalNotifier {
    /// Creates a notifier. A disabled notifier starts (and stays) denied.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        let initial = if enabled {
            PermissionState::NotYetAsked
        } else {
            PermissionState::Denied
        };
        Self {
            enabled,
            state: Mutex::new(initial),
        }
    }

    fn set_state(&self, state: PermissionState) {
        if let Ok(mut guard) = self.state.lock() {
            *guard = state;
        }
    }
}

impl NotificationFacility for TerminalNotifier {
    async fn query(&self) -> PermissionState {
        self.state
            .lock()
            .map(|guard| *guard)
            .unwrap_or(PermissionState::Denied)
    }

    async fn request(&self) -> Result<PermissionState, NotificationError> {
        let state = if self.enabled {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        self.set_state(state);
        Ok(state)
    }

    async fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.query().await.is_granted() {
            return Err(NotificationError::PermissionDenied);
        }
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "\x07\n{}\n  {}", content.title, content.body)
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}
