//! UNUserNotificationCenter backend (macOS only).
//!
//! `UNUserNotificationCenter` requires the process to live inside an app
//! bundle; bare CLI binaries fall back to the terminal notifier.

use std::cell::RefCell;
use std::ptr::NonNull;

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_foundation::{NSError, NSString};
use objc2_user_notifications::{
    UNAuthorizationOptions, UNAuthorizationStatus, UNMutableNotificationContent,
    UNNotificationRequest, UNNotificationSettings, UNNotificationSound, UNUserNotificationCenter,
};
use tokio::sync::oneshot;
use tracing::warn;
use uuid::Uuid;

use crate::types::PermissionState;

use super::content::NotificationContent;
use super::error::NotificationError;
use super::NotificationFacility;

pub struct NotificationCenter;

impl NotificationCenter {
    #[must_use]
    pub fn current() -> Retained<UNUserNotificationCenter> {
        UNUserNotificationCenter::currentNotificationCenter()
    }

    pub async fn request_authorization() -> Result<bool, NotificationError> {
        let (tx, rx) = oneshot::channel::<Result<bool, NotificationError>>();

        let options = UNAuthorizationOptions::Alert | UNAuthorizationOptions::Sound;

        let cb = RefCell::new(Some(tx));
        let block = RcBlock::new(move |granted: Bool, error: *mut NSError| {
            if let Some(sender) = cb.borrow_mut().take() {
                let result = match unsafe { error.as_ref() } {
                    Some(err_ref) => Err(NotificationError::AuthorizationFailed(
                        err_ref.localizedDescription().to_string(),
                    )),
                    None => Ok(granted.as_bool()),
                };
                let _ = sender.send(result);
            }
        });

        Self::current().requestAuthorizationWithOptions_completionHandler(options, &block);

        rx.await
            .map_err(|_| NotificationError::InitializationFailed("Channel closed".to_string()))?
    }

    pub async fn get_authorization_status() -> Result<UNAuthorizationStatus, NotificationError> {
        let (tx, rx) = oneshot::channel::<UNAuthorizationStatus>();

        let cb = RefCell::new(Some(tx));
        let block = RcBlock::new(move |settings: NonNull<UNNotificationSettings>| {
            if let Some(sender) = cb.borrow_mut().take() {
                let status = unsafe { settings.as_ref().authorizationStatus() };
                let _ = sender.send(status);
            }
        });

        Self::current().getNotificationSettingsWithCompletionHandler(&block);

        rx.await
            .map_err(|_| NotificationError::InitializationFailed("Channel closed".to_string()))
    }

    pub async fn add_notification_request(
        request: &UNNotificationRequest,
    ) -> Result<(), NotificationError> {
        let (tx, rx) = oneshot::channel::<Result<(), NotificationError>>();

        let cb = RefCell::new(Some(tx));
        let block = RcBlock::new(move |error: *mut NSError| {
            if let Some(sender) = cb.borrow_mut().take() {
                let result = match unsafe { error.as_ref() } {
                    Some(err_ref) => Err(NotificationError::SendFailed(
                        err_ref.localizedDescription().to_string(),
                    )),
                    None => Ok(()),
                };
                let _ = sender.send(result);
            }
        });

        Self::current().addNotificationRequest_withCompletionHandler(request, Some(&block));

        rx.await
            .map_err(|_| NotificationError::SendFailed("Channel closed".to_string()))?
    }
}

/// Maps the system authorization status onto the session permission state.
fn permission_from_status(status: UNAuthorizationStatus) -> PermissionState {
    match status {
        UNAuthorizationStatus::Denied => PermissionState::Denied,
        UNAuthorizationStatus::Authorized
        | UNAuthorizationStatus::Provisional
        | UNAuthorizationStatus::Ephemeral => PermissionState::Granted,
        _ => PermissionState::NotYetAsked,
    }
}

fn create_notification_request(content: &NotificationContent) -> Retained<UNNotificationRequest> {
    let mutable = unsafe { UNMutableNotificationContent::new() };
    let title = NSString::from_str(&content.title);
    let body = NSString::from_str(&content.body);
    let sound = unsafe { UNNotificationSound::defaultSound() };
    unsafe {
        mutable.setTitle(&title);
        mutable.setBody(&body);
        mutable.setSound(Some(&sound));
    }

    let identifier = NSString::from_str(&Uuid::new_v4().to_string());
    UNNotificationRequest::requestWithIdentifier_content_trigger(&identifier, &mutable, None)
}

/// Native macOS notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacNotificationFacility;

impl NotificationFacility for MacNotificationFacility {
    async fn query(&self) -> PermissionState {
        match NotificationCenter::get_authorization_status().await {
            Ok(status) => permission_from_status(status),
            Err(e) => {
                warn!("Failed to read notification settings: {}", e);
                PermissionState::NotYetAsked
            }
        }
    }

    async fn request(&self) -> Result<PermissionState, NotificationError> {
        let granted = NotificationCenter::request_authorization().await?;
        Ok(if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        })
    }

    async fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        let request = create_notification_request(content);
        NotificationCenter::add_notification_request(&request).await
    }
}
