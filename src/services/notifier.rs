use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use metrics::counter;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::models::{Notification, NotificationKind};
use crate::ui::Ui;

/// Owner of the page's notification container.
///
/// One manager is created at page init and cloned into every component
/// that reports to the user. Each notification expires on its own after
/// `display_for`; the container holds at most `max_visible` entries and
/// evicts the oldest when full.
#[derive(Clone)]
pub struct NotificationManager {
    visible: Arc<Mutex<VecDeque<Notification>>>,
    ui: Arc<dyn Ui>,
    display_for: Duration,
    max_visible: usize,
}

impl NotificationManager {
    pub fn new(ui: Arc<dyn Ui>, display_for: Duration, max_visible: usize) -> Self {
        Self {
            visible: Arc::new(Mutex::new(VecDeque::new())),
            ui,
            display_for,
            max_visible: max_visible.max(1),
        }
    }

    pub fn from_config(ui: Arc<dyn Ui>, config: &ClientConfig) -> Self {
        Self::new(ui, config.notification_display, config.notification_max_visible)
    }

    /// Show a message. Expiry is timed on the current Tokio runtime; called
    /// outside one, the notification stays until dismissed or evicted.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> Uuid {
        let notification = Notification::new(message, kind);
        let id = notification.id;

        match kind {
            NotificationKind::Success => tracing::info!(%id, message = %notification.message, "Notification"),
            NotificationKind::Error => tracing::warn!(%id, message = %notification.message, "Notification"),
        }

        {
            let mut visible = self.lock();
            while visible.len() >= self.max_visible {
                if let Some(evicted) = visible.pop_front() {
                    tracing::debug!(id = %evicted.id, "Notification evicted, container full");
                }
            }
            visible.push_back(notification);
        }
        counter!("notifications_shown", "kind" => kind.to_string()).increment(1);
        self.render();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let manager = self.clone();
                let display_for = self.display_for;
                handle.spawn(async move {
                    tokio::time::sleep(display_for).await;
                    if manager.remove(id) {
                        tracing::debug!(%id, "Notification expired");
                    }
                });
            }
            Err(_) => tracing::warn!(%id, "No Tokio runtime, notification will not auto-expire"),
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, NotificationKind::Error)
    }

    /// Manual close. Returns false if the notification was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.remove(id)
    }

    /// Snapshot of the container, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn remove(&self, id: Uuid) -> bool {
        let removed = {
            let mut visible = self.lock();
            let before = visible.len();
            visible.retain(|n| n.id != id);
            visible.len() != before
        };
        if removed {
            self.render();
        }
        removed
    }

    fn render(&self) {
        let snapshot = self.visible();
        self.ui.render_notifications(&snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        self.visible.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
