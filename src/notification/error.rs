//! Notification system error types.
//!
//! None of these are fatal: the countdown keeps running when a notification
//! cannot be requested or shown.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Failed to request notification authorization from the system.
    #[error("failed to request notification permission: {0}")]
    AuthorizationFailed(String),

    /// Failed to send a notification.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// A notification was sent without permission.
    #[error("notification permission was denied")]
    PermissionDenied,

    /// The notification backend could not be initialized.
    #[error("failed to initialize notifications: {0}")]
    InitializationFailed(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::AuthorizationFailed(_)
        )
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::AuthorizationFailed(_) | Self::PermissionDenied => {
                "allow notifications for this program in the system settings"
            }
            Self::SendFailed(_) => "check the system notification center",
            Self::InitializationFailed(_) => "restart the countdown",
        }
    }
}
