//! Notification layer: one transient toast at a time.
//!
//! Showing a toast while another is visible replaces it. Each toast dismisses
//! itself after a fixed timeout unless it is replaced or dismissed first; the
//! timeout is a task in the owner's [`Timers`] queue and is cancelled along
//! with the toast.

use crate::timers::{TimerId, Timers};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Toasts remembered by [`ToastSlot::history`].
pub const HISTORY_LIMIT: usize = 32;

/// Timer payload: the toast with this serial has timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastExpired(u64);

#[derive(Debug)]
pub struct ToastSlot {
    timeout: Duration,
    current: Option<(u64, Toast)>,
    timer: Option<TimerId>,
    serial: u64,
    /// The last [`HISTORY_LIMIT`] toasts shown, oldest first.
    history: Vec<Toast>,
}

impl ToastSlot {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current: None,
            timer: None,
            serial: 0,
            history: Vec::new(),
        }
    }

    /// Show `toast`, replacing (and un-scheduling) any visible one.
    pub fn show<T: From<ToastExpired>>(&mut self, toast: Toast, timers: &mut Timers<T>) {
        if let Some(timer) = self.timer.take() {
            timers.cancel(timer);
        }
        self.serial += 1;
        let serial = self.serial;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(toast.clone());
        self.current = Some((serial, toast));
        self.timer = Some(timers.schedule(self.timeout, ToastExpired(serial).into()));
    }

    /// Handle a fired timeout. Stale timeouts for replaced toasts are ignored.
    /// Returns whether the visible toast was removed.
    pub fn expire(&mut self, event: ToastExpired) -> bool {
        match &self.current {
            Some((serial, _)) if *serial == event.0 => {
                self.current = None;
                self.timer = None;
                true
            }
            _ => false,
        }
    }

    /// Manual dismissal.
    pub fn dismiss<T>(&mut self, timers: &mut Timers<T>) {
        if let Some(timer) = self.timer.take() {
            timers.cancel(timer);
        }
        self.current = None;
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(_, toast)| toast)
    }

    pub fn history(&self) -> &[Toast] {
        &self.history
    }
}
