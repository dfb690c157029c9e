//! Notification texts for elapsed boundaries.

use crate::types::{BoundaryKind, Language};

/// Title and body of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Creates the notification shown when `kind` has just elapsed.
    ///
    /// Suhoor elapsing closes the pre-dawn meal window; iftar elapsing opens
    /// the sunset meal.
    #[must_use]
    pub fn for_boundary(kind: BoundaryKind, language: Language) -> Self {
        let (title, body) = match (kind, language) {
            (BoundaryKind::Suhoor, Language::En) => (
                "🕌 Suhoor time is over",
                "Stop eating. It is time for Fajr.",
            ),
            (BoundaryKind::Iftar, Language::En) => (
                "🌙 Iftar time has come",
                "You may break your fast. It is time for Maghrib.",
            ),
            (BoundaryKind::Suhoor, Language::Ru) => (
                "🕌 Время сухура закончилось",
                "Прекратите приём пищи. Пора на Фаджр.",
            ),
            (BoundaryKind::Iftar, Language::Ru) => (
                "🌙 Время ифтара наступило",
                "Можно разговляться. Пора на Магриб.",
            ),
            (BoundaryKind::Suhoor, Language::Tr) => (
                "🕌 Sahur vakti sona erdi",
                "Yemeyi bırakın. Sabah namazı vakti.",
            ),
            (BoundaryKind::Iftar, Language::Tr) => (
                "🌙 İftar vakti geldi",
                "Orucunuzu açabilirsiniz. Akşam namazı vakti.",
            ),
        };
        Self::new(title, body)
    }
}
