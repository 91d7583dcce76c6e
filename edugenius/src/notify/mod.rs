//! In-process notification center.
//!
//! An explicit context object with construct-on-startup lifecycle: the server
//! builds one [`NotificationCenter`] and injects it where needed, instead of a
//! module-level singleton holding listener lists. Publishing appends to a
//! bounded recent list and fans out to live subscribers over a broadcast
//! channel; delivery to external push services is a collaborator concern and
//! not handled here.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::clock::Clock;

/// Severity/category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// A notification before publication assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub action_url: Option<String>,
}

impl NewNotification {
    pub fn new(title: impl Into<String>, body: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind,
            action_url: None,
        }
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}

const DEFAULT_RECENT_CAPACITY: usize = 100;
const BROADCAST_CAPACITY: usize = 64;

/// Publish/subscribe hub with a bounded recent list.
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    sender: broadcast::Sender<Notification>,
    recent: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity(clock, DEFAULT_RECENT_CAPACITY)
    }

    /// `capacity` bounds the recent list; the oldest entry is dropped first.
    pub fn with_capacity(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            clock,
            sender,
            recent: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Stamps, records, and fans out a notification. Returns the published
    /// record. Send failures (no live subscribers) are not errors.
    pub fn publish(&self, new: NewNotification) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            title: new.title,
            body: new.body,
            kind: new.kind,
            action_url: new.action_url,
            created_at: self.clock.now(),
            read: false,
        };
        if let Ok(mut recent) = self.recent.lock() {
            if recent.len() == self.capacity {
                recent.pop_front();
            }
            recent.push_back(notification.clone());
        }
        let _ = self.sender.send(notification.clone());
        notification
    }

    /// Live feed of future notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Most recent notifications, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        self.recent
            .lock()
            .map(|recent| recent.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Marks one notification read; returns whether it was found.
    pub fn mark_read(&self, id: Uuid) -> bool {
        let Ok(mut recent) = self.recent.lock() else {
            return false;
        };
        for notification in recent.iter_mut() {
            if notification.id == id {
                notification.read = true;
                return true;
            }
        }
        false
    }

    pub fn unread_count(&self) -> usize {
        self.recent
            .lock()
            .map(|recent| recent.iter().filter(|n| !n.read).count())
            .unwrap_or(0)
    }
}
