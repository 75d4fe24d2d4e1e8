//! Transient notifications

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default time a toast stays visible
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
    /// `None` stays until dismissed
    pub duration: Option<Duration>,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.duration
            .is_some_and(|d| now.saturating_duration_since(self.created_at) >= d)
    }
}

/// Visible toasts, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast; a zero duration means it stays until dismissed
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> String {
        self.push_at(message, kind, duration, Instant::now())
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
        now: Instant,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.toasts.push(Toast {
            id: id.clone(),
            message: message.into(),
            kind,
            duration: (!duration.is_zero()).then_some(duration),
            created_at: now,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> String {
        self.push(message, ToastKind::Success, DEFAULT_TOAST_DURATION)
    }

    pub fn error(&mut self, message: impl Into<String>) -> String {
        self.push(message, ToastKind::Error, DEFAULT_TOAST_DURATION)
    }

    pub fn info(&mut self, message: impl Into<String>) -> String {
        self.push(message, ToastKind::Info, DEFAULT_TOAST_DURATION)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> String {
        self.push(message, ToastKind::Warning, DEFAULT_TOAST_DURATION)
    }

    /// Remove a toast by id; `false` when it was already gone
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop expired toasts, returning how many were removed
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_duration() {
        let mut queue = ToastQueue::new();
        let start = Instant::now();
        queue.push_at("Saved", ToastKind::Success, Duration::from_millis(3000), start);
        queue.push_at("Sticky", ToastKind::Info, Duration::ZERO, start);

        assert_eq!(queue.prune(start + Duration::from_millis(2999)), 0);
        assert_eq!(queue.prune(start + Duration::from_millis(3000)), 1);
        assert_eq!(queue.visible()[0].message, "Sticky");
    }

    #[test]
    fn dismiss_by_id() {
        let mut queue = ToastQueue::new();
        let id = queue.warning("Create a playlist first from the Playlists page!");
        queue.error("Failed");

        assert!(queue.dismiss(&id));
        assert!(!queue.dismiss(&id));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.visible()[0].kind, ToastKind::Error);
    }

    #[test]
    fn ids_are_unique() {
        let mut queue = ToastQueue::new();
        let a = queue.info("a");
        let b = queue.info("a");
        assert_ne!(a, b);
    }
}
