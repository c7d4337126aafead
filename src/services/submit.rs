use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metrics::counter;

use super::notifier::NotificationManager;
use crate::errors::ClientError;
use crate::models::{ApiResponse, FormData};
use crate::storefront::{Endpoint, Storefront};
use crate::ui::{ModalId, Ui};

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted; a reload is scheduled.
    Succeeded,
    /// Server replied `success: false` with this message.
    Rejected(String),
    /// Transport failure or unreadable reply.
    Failed(String),
    /// Caught locally before any request was made.
    Invalid(String),
    /// User declined the confirmation prompt.
    Declined,
    /// A request for the same draft is still in flight.
    AlreadyPending,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded)
    }
}

/// Keys of drafts with a request in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    /// Claim `key`; `None` if it is already claimed.
    pub fn try_acquire(&self, key: &str) -> Option<InFlightTicket> {
        let mut keys = self.keys.lock().unwrap_or_else(|p| p.into_inner());
        if !keys.insert(key.to_string()) {
            return None;
        }
        Some(InFlightTicket {
            keys: Arc::clone(&self.keys),
            key: key.to_string(),
            trigger: None,
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains(key)
    }
}

/// Releases its key when dropped, including when the submitting future
/// is cancelled, and re-enables the bound trigger.
pub struct InFlightTicket {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
    trigger: Option<Arc<dyn Ui>>,
}

impl InFlightTicket {
    /// Disable the trigger named by this ticket's key until the ticket drops.
    pub fn bind_trigger(mut self, ui: Arc<dyn Ui>) -> Self {
        ui.set_trigger_enabled(&self.key, false);
        self.trigger = Some(ui);
        self
    }
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(&self.key);
        if let Some(ui) = self.trigger.take() {
            ui.set_trigger_enabled(&self.key, true);
        }
    }
}

fn success_message(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::PlaceOrder => "Order placed successfully!",
        Endpoint::SubmitReview => "Review submitted successfully!",
        Endpoint::UpdateOrderStatus => "Order status updated!",
    }
}

fn failure_context(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::PlaceOrder => "Error placing order",
        Endpoint::SubmitReview => "Error submitting review",
        Endpoint::UpdateOrderStatus => "Error updating order",
    }
}

/// Shared submit-and-refresh pattern behind every mutating action.
#[derive(Clone)]
pub struct SubmitWorkflow {
    storefront: Arc<dyn Storefront>,
    ui: Arc<dyn Ui>,
    notifier: NotificationManager,
    in_flight: InFlight,
    reload_delay: Duration,
}

impl SubmitWorkflow {
    pub fn new(
        storefront: Arc<dyn Storefront>,
        ui: Arc<dyn Ui>,
        notifier: NotificationManager,
        reload_delay: Duration,
    ) -> Self {
        Self {
            storefront,
            ui,
            notifier,
            in_flight: InFlight::default(),
            reload_delay,
        }
    }

    pub fn notifier(&self) -> &NotificationManager {
        &self.notifier
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// POST `form` once. On success, close `modal` (if any) and schedule a
    /// full reload. `key` identifies the draft; its trigger stays disabled
    /// while the request is pending and duplicate submits are refused.
    pub async fn submit(
        &self,
        endpoint: Endpoint,
        form: FormData,
        modal: Option<&ModalId>,
        key: &str,
    ) -> SubmitOutcome {
        let Some(ticket) = self.in_flight.try_acquire(key) else {
            tracing::debug!(endpoint = endpoint.as_str(), key, "Submission already in flight");
            return SubmitOutcome::AlreadyPending;
        };

        let ticket = ticket.bind_trigger(Arc::clone(&self.ui));
        counter!("submissions_total", "action" => endpoint.as_str()).increment(1);
        tracing::info!(endpoint = endpoint.as_str(), key, "Submitting form");

        let result = self.storefront.post_form(endpoint, &form).await;

        drop(ticket);

        match result {
            Ok(ApiResponse { success: true, .. }) => {
                self.notifier.success(success_message(endpoint));
                if let Some(modal) = modal {
                    self.ui.hide_modal(modal);
                }
                self.schedule_reload();
                SubmitOutcome::Succeeded
            }
            Ok(ApiResponse { message, .. }) => {
                let message = message.unwrap_or_else(|| "unknown error".into());
                counter!("submissions_rejected", "action" => endpoint.as_str()).increment(1);
                tracing::warn!(endpoint = endpoint.as_str(), key, reason = %message, "Storefront rejected submission");
                let err = ClientError::Application(message.clone());
                self.notifier.error(err.user_message());
                SubmitOutcome::Rejected(message)
            }
            Err(e) => {
                let err = ClientError::from(e);
                counter!("submissions_failed", "action" => endpoint.as_str()).increment(1);
                tracing::error!(endpoint = endpoint.as_str(), key, error = %err, "Submission failed");
                let message = err.user_message();
                self.notifier
                    .error(format!("{}: {message}", failure_context(endpoint)));
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn schedule_reload(&self) {
        let ui = Arc::clone(&self.ui);
        let delay = self.reload_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("Reloading view");
            ui.reload();
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
