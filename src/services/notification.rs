use std::time::Duration;

/// Transient toast shown to the user. One at a time; a newer notification
/// replaces whatever is on screen and restarts the dismiss timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

impl Notification {
    /// How long a toast stays on screen before auto-dismissing.
    pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✕",
            NotificationKind::Warning => "⚠",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#16a34a",
            NotificationKind::Error => "#dc2626",
            NotificationKind::Warning => "#d97706",
        }
    }
}
