//! Boundary notifications.
//!
//! The host's notification capability is injected as a
//! [`NotificationFacility`] (`query` / `request` / `notify`) so it can be
//! replaced by a fake in tests. [`PermissionGate`] runs the permission
//! sub-flow on top of it:
//!
//! - at start-up the current state is read; if the user was never asked,
//!   exactly one request is issued
//! - a manual request is honoured only while still not asked
//! - a request that failed with an error is retried at the next boundary
//! - a denial is terminal for the session
//! - boundary notifications are shown only while permission is granted
//!
//! # Example
//!
//! ```
//! use iftar::notification::{MockNotificationFacility, PermissionGate};
//! use iftar::types::{BoundaryKind, Language, PermissionState};
//!
//! # async fn example() {
//! let mut gate = PermissionGate::new(MockNotificationFacility::new(), Language::En);
//! assert_eq!(gate.initialize().await, PermissionState::Granted);
//! assert!(gate.notify_boundary(BoundaryKind::Iftar).await.unwrap());
//! # }
//! ```

pub mod content;
pub mod error;
pub mod terminal;

#[cfg(target_os = "macos")]
mod center;

use tracing::{debug, warn};

pub use self::content::NotificationContent;
pub use self::error::NotificationError;
pub use self::terminal::TerminalNotifier;

#[cfg(target_os = "macos")]
pub use self::center::MacNotificationFacility;

use crate::types::{BoundaryKind, Language, PermissionState};

#[allow(async_fn_in_trait)]
pub trait NotificationFacility {
    async fn query(&self) -> PermissionState;
    async fn request(&self) -> Result<PermissionState, NotificationError>;
    async fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError>;
}

// ============================================================================
// PermissionGate
// ============================================================================

/// Session-scoped permission state on top of a notification facility.
pub struct PermissionGate<N> {
    facility: N,
    state: PermissionState,
    language: Language,
}

impl<N: NotificationFacility> PermissionGate<N> {
    pub fn new(facility: N, language: Language) -> Self {
        Self {
            facility,
            state: PermissionState::NotYetAsked,
            language,
        }
    }

    /// Reads the host state and asks once if the user was never asked.
    pub async fn initialize(&mut self) -> PermissionState {
        if self.sync().await == PermissionState::NotYetAsked {
            self.request_once().await;
        }
        self.state
    }

    /// Reads the host state without asking.
    pub async fn sync(&mut self) -> PermissionState {
        self.state = self.facility.query().await;
        debug!("Notification permission: {}", self.state.as_str());
        self.state
    }

    /// Asks for permission on explicit user action.
    ///
    /// Does nothing once the user has answered.
    pub async fn request_manually(&mut self) -> PermissionState {
        if self.state == PermissionState::NotYetAsked {
            self.request_once().await;
        }
        self.state
    }

    async fn request_once(&mut self) {
        match self.facility.request().await {
            Ok(state) => self.state = state,
            Err(e) => warn!("Notification permission request failed: {}", e),
        }
    }

    /// Shows the notification for an elapsed boundary.
    ///
    /// A request that failed earlier in the session is retried here once
    /// per boundary. Returns `Ok(false)` without notifying unless permission
    /// is granted.
    pub async fn notify_boundary(&mut self, kind: BoundaryKind) -> Result<bool, NotificationError> {
        if self.state == PermissionState::NotYetAsked {
            self.request_once().await;
        }
        if !self.state.is_granted() {
            debug!("Skipping {} notification: permission {}", kind.as_str(), self.state.as_str());
            return Ok(false);
        }
        let content = NotificationContent::for_boundary(kind, self.language);
        self.facility.notify(&content).await?;
        Ok(true)
    }

    #[must_use]
    pub fn state(&self) -> PermissionState {
        self.state
    }

    #[must_use]
    pub fn facility(&self) -> &N {
        &self.facility
    }
}

// ============================================================================
// SystemNotifier
// ============================================================================

/// The notification backend chosen for this host.
#[derive(Debug)]
pub enum SystemNotifier {
    Terminal(TerminalNotifier),
    #[cfg(target_os = "macos")]
    Mac(MacNotificationFacility),
}

impl SystemNotifier {
    /// Picks the native backend when it can work, the terminal otherwise.
    #[must_use]
    pub fn detect(enabled: bool) -> Self {
        #[cfg(target_os = "macos")]
        {
            if enabled && running_in_app_bundle() {
                return Self::Mac(MacNotificationFacility);
            }
        }
        Self::Terminal(TerminalNotifier::new(enabled))
    }
}

#[cfg(target_os = "macos")]
fn running_in_app_bundle() -> bool {
    std::env::current_exe()
        .map(|path| path.to_string_lossy().contains(".app/Contents/MacOS/"))
        .unwrap_or(false)
}

impl NotificationFacility for SystemNotifier {
    async fn query(&self) -> PermissionState {
        match self {
            Self::Terminal(n) => n.query().await,
            #[cfg(target_os = "macos")]
            Self::Mac(n) => n.query().await,
        }
    }

    async fn request(&self) -> Result<PermissionState, NotificationError> {
        match self {
            Self::Terminal(n) => n.request().await,
            #[cfg(target_os = "macos")]
            Self::Mac(n) => n.request().await,
        }
    }

    async fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        match self {
            Self::Terminal(n) => n.notify(content).await,
            #[cfg(target_os = "macos")]
            Self::Mac(n) => n.notify(content).await,
        }
    }
}

// ============================================================================
// MockNotificationFacility
// ============================================================================

#[derive(Debug)]
pub struct MockNotificationFacility {
    state: std::sync::Mutex<PermissionState>,
    request_answer: std::sync::Mutex<PermissionState>,
    request_count: std::sync::atomic::AtomicUsize,
    notifications: std::sync::Mutex<Vec<NotificationContent>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl Default for MockNotificationFacility {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotificationFacility {
    /// Starts not yet asked; a request is answered with `Granted`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(PermissionState::NotYetAsked, PermissionState::Granted)
    }

    #[must_use]
    pub fn with_state(initial: PermissionState, request_answer: PermissionState) -> Self {
        Self {
            state: std::sync::Mutex::new(initial),
            request_answer: std::sync::Mutex::new(request_answer),
            request_count: std::sync::atomic::AtomicUsize::new(0),
            notifications: std::sync::Mutex::new(Vec::new()),
            should_fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<NotificationContent> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl NotificationFacility for MockNotificationFacility {
    async fn query(&self) -> PermissionState {
        *self.state.lock().unwrap()
    }

    async fn request(&self) -> Result<PermissionState, NotificationError> {
        self.request_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::AuthorizationFailed(
                "Mock failure".to_string(),
            ));
        }
        let answer = *self.request_answer.lock().unwrap();
        *self.state.lock().unwrap() = answer;
        Ok(answer)
    }

    async fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications.lock().unwrap().push(content.clone());
        Ok(())
    }
}
