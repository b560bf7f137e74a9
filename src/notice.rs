use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a notice stays up before it dismisses itself.
pub const DISMISS_AFTER_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn icon(self) -> &'static str {
        match self {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub icon: &'static str,
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub dismiss_after_ms: i64,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Notice {
            kind,
            icon: kind.icon(),
            message: message.into(),
            shown_at,
            dismiss_after_ms: DISMISS_AFTER_SECS * 1000,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + Duration::seconds(DISMISS_AFTER_SECS)
    }
}

/// The single place a notice can live. Showing a new one evicts the old.
#[derive(Debug, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>) -> Option<Notice> {
        self.show_at(kind, message, Utc::now())
    }

    pub fn show_at(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Option<Notice> {
        self.current.replace(Notice::new(kind, message, now))
    }

    pub fn success(&mut self, message: impl Into<String>) -> Option<Notice> {
        self.show(NoticeKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Option<Notice> {
        self.show(NoticeKind::Error, message)
    }

    pub fn dismiss(&mut self) -> Option<Notice> {
        self.current.take()
    }

    /// Drops the notice once its timeout has passed.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at()) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn into_current(self) -> Option<Notice> {
        self.current
    }
}
