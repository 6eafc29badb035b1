use std::time::{Duration, Instant};

use crate::views::html::escape;

pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

const TOAST_BASE_CLASS: &str =
    "fixed top-5 right-5 px-5 py-3 rounded-lg shadow-lg text-white font-medium transition-all duration-300 z-50";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-[#FFA04D]",
            ToastKind::Warning => "bg-yellow-500 text-[#446178]",
            ToastKind::Error => "bg-red-500",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < TOAST_DURATION
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div id="toast-container" class="{} {}">{}</div>"#,
            TOAST_BASE_CLASS,
            self.kind.css_class(),
            escape(&self.message)
        )
    }
}

/// One visible toast at a time; showing a new one replaces the old.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> &Toast {
        self.show_at(message, kind, Instant::now())
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> &Toast {
        self.current.insert(Toast {
            message: message.into(),
            kind,
            shown_at: now,
        })
    }

    pub fn visible_at(&self, now: Instant) -> Option<&Toast> {
        self.current.as_ref().filter(|t| t.is_visible_at(now))
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.visible_at(Instant::now())
    }

    /// Last toast shown, expired or not.
    pub fn last(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|t| !t.is_visible_at(now)) {
            self.current = None;
        }
    }
}
