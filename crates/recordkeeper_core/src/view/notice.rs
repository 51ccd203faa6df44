//! Transient notices and destructive-action confirmation.
//!
//! # Responsibility
//! - Describe toast messages emitted after mutations.
//! - Define the `Notifier` sink and `Confirm` prompt a host UI implements.
//!
//! # Invariants
//! - Notices never influence domain state; `delay` and `dismiss_after` are
//!   cosmetic timing hints for the presenter.
//! - Log output from `LogNotifier` carries level and length only, never the
//!   message text.

use log::info;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// One toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// How long the presenter waits before showing the notice.
    pub delay: Duration,
    /// How long the notice stays visible.
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            delay: Duration::ZERO,
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn dismiss_after(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after = dismiss_after;
        self
    }
}

/// Sink for notices. Implementations must not fail.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only records metadata in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        info!(
            "event=notice module=view status=ok level={} chars={} delay_ms={}",
            notice.level.as_str(),
            notice.message.chars().count(),
            notice.delay.as_millis()
        );
    }
}

/// Notifier that keeps every notice in memory, for presenters that drain a
/// queue and for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every recorded notice.
    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Returns the messages recorded so far without draining them.
    pub fn messages(&self) -> Vec<String> {
        match self.notices.lock() {
            Ok(notices) => notices.iter().map(|n| n.message.clone()).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|n| n.message.clone())
                .collect(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}

/// Forwards notices with the configured display time applied to those still
/// on [`DEFAULT_DISMISS_AFTER`].
pub struct DismissAfter {
    inner: Arc<dyn Notifier>,
    dismiss_after: Duration,
}

impl DismissAfter {
    pub fn new(inner: Arc<dyn Notifier>, dismiss_after: Duration) -> Self {
        Self {
            inner,
            dismiss_after,
        }
    }
}

impl Notifier for DismissAfter {
    fn notify(&self, notice: Notice) {
        let notice = if notice.dismiss_after == DEFAULT_DISMISS_AFTER {
            notice.dismiss_after(self.dismiss_after)
        } else {
            notice
        };
        self.inner.notify(notice);
    }
}

/// Interactive yes/no prompt guarding destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Fixed answer, for non-interactive callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AutoConfirm, Confirm, DismissAfter, Notice, NoticeLevel, Notifier, RecordingNotifier,
    };
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn recording_notifier_drains_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::success("first"));
        notifier.notify(Notice::error("second"));

        assert_eq!(notifier.messages(), vec!["first", "second"]);
        let drained = notifier.take();
        assert_eq!(drained[1].level, NoticeLevel::Error);
        assert!(notifier.take().is_empty());
    }

    #[test]
    fn delayed_notice_keeps_default_dismissal() {
        let notice = Notice::info("later").delayed(Duration::from_millis(2000));
        assert_eq!(notice.delay, Duration::from_millis(2000));
        assert_eq!(notice.dismiss_after, Duration::from_millis(3000));
    }

    #[test]
    fn closures_and_fixed_answers_confirm() {
        let prompt_seen = |prompt: &str| prompt.contains("delete");
        assert!(prompt_seen.confirm("Are you sure you want to delete this item?"));
        assert!(!AutoConfirm(false).confirm("anything"));
    }

    #[test]
    fn dismiss_policy_only_replaces_the_default() {
        let recorder = Arc::new(RecordingNotifier::new());
        let notifier = DismissAfter::new(recorder.clone(), Duration::from_millis(5000));
        notifier.notify(Notice::success("saved"));
        notifier.notify(Notice::info("sticky").dismiss_after(Duration::from_secs(60)));

        let notices = recorder.take();
        assert_eq!(notices[0].dismiss_after, Duration::from_millis(5000));
        assert_eq!(notices[1].dismiss_after, Duration::from_secs(60));
    }
}
