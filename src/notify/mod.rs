//! Structured notification observer.
//!
//! Instead of a global toast singleton, the core emits [`Notice`]s to
//! whatever [`Notifier`] the host registers — a console renderer, a GUI
//! toast layer, or a test recorder. The notice copy mirrors the feedback a
//! learner sees: listening prompts, success, correct/incorrect verdicts,
//! and provider failures.

use std::sync::Arc;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Severity of a notice — hosts typically map this to toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A single structured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier trait
// ---------------------------------------------------------------------------

/// Observer interface for user-facing notifications.
///
/// Implementors must be `Send + Sync`; the orchestrator holds one behind
/// `Arc<dyn Notifier>` and calls it from async context, so `notify` must
/// not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Shared handle to a notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

// ---------------------------------------------------------------------------
// LogNotifier
// ---------------------------------------------------------------------------

/// Routes notices through the `log` facade — the default sink when the
/// host registers nothing richer.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                log::info!("{}: {}", notice.title, notice.body);
            }
            NoticeLevel::Error => {
                log::error!("{}: {}", notice.title, notice.body);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every notice for later assertions.
    pub struct RecordingNotifier {
        pub notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self {
                notices: Mutex::new(Vec::new()),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    #[test]
    fn constructors_set_the_level() {
        assert_eq!(Notice::info("t", "b").level, NoticeLevel::Info);
        assert_eq!(Notice::success("t", "b").level, NoticeLevel::Success);
        assert_eq!(Notice::error("t", "b").level, NoticeLevel::Error);
    }

    #[test]
    fn recording_notifier_preserves_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::info("Listening...", "Speak your topic now"));
        notifier.notify(Notice::success("Success!", "Your learning content is ready!"));

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].title, "Listening...");
        assert_eq!(notices[1].level, NoticeLevel::Success);
    }

    /// `LogNotifier` must satisfy the shared-handle type.
    #[test]
    fn log_notifier_is_object_safe() {
        let notifier: SharedNotifier = Arc::new(LogNotifier);
        notifier.notify(Notice::info("test", "message"));
    }
}
