use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::ClientError;
use crate::models::{Rating, ReviewDraft};
use crate::services::{NotificationManager, SubmitOutcome, SubmitWorkflow};
use crate::storefront::Endpoint;
use crate::ui::{ModalId, Ui};

pub const MISSING_RATING_MESSAGE: &str = "Please select a rating";

/// Page elements and pending draft for one reviewable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub modal: ModalId,
    pub comment_field: String,
    pub rating_group: String,
    pub trigger: String,
    pub draft: ReviewDraft,
}

impl ReviewEntry {
    fn new(order_id: &str) -> Self {
        Self {
            modal: ModalId::review(order_id),
            comment_field: format!("comment-{order_id}"),
            rating_group: format!("rating-{order_id}"),
            trigger: format!("review:{order_id}"),
            draft: ReviewDraft::new(order_id),
        }
    }
}

/// Per-order review dialogs, registered once when the page renders.
pub struct ReviewRegistry {
    entries: Mutex<HashMap<String, ReviewEntry>>,
    ui: Arc<dyn Ui>,
    workflow: SubmitWorkflow,
    notifier: NotificationManager,
}

impl ReviewRegistry {
    pub fn new(ui: Arc<dyn Ui>, workflow: SubmitWorkflow) -> Self {
        let notifier = workflow.notifier().clone();
        Self {
            entries: Mutex::new(HashMap::new()),
            ui,
            workflow,
            notifier,
        }
    }

    /// Add an order's review dialog. Registering twice keeps the existing draft.
    pub fn register(&self, order_id: &str) {
        self.lock()
            .entry(order_id.to_string())
            .or_insert_with(|| ReviewEntry::new(order_id));
    }

    pub fn entry(&self, order_id: &str) -> Option<ReviewEntry> {
        self.lock().get(order_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn open_review_draft(&self, order_id: &str) -> Result<(), ClientError> {
        let modal = self.with_entry(order_id, |entry| entry.modal.clone())?;
        self.ui.show_modal(&modal);
        Ok(())
    }

    /// Select a rating; replaces any earlier selection.
    pub fn select_rating(&self, order_id: &str, rating: Rating) -> Result<(), ClientError> {
        self.with_entry(order_id, |entry| entry.draft.select_rating(rating))
    }

    pub fn set_comment(&self, order_id: &str, comment: &str) -> Result<(), ClientError> {
        self.with_entry(order_id, |entry| entry.draft.comment = comment.to_string())
    }

    /// Discard the draft and hide the dialog.
    pub fn close(&self, order_id: &str) -> Result<(), ClientError> {
        let modal = self.with_entry(order_id, |entry| {
            entry.draft = ReviewDraft::new(order_id);
            entry.modal.clone()
        })?;
        self.ui.hide_modal(&modal);
        Ok(())
    }

    /// POST the review to `/submit_review`. Without a selected rating the
    /// user is told so and nothing is sent.
    pub async fn submit_review(&self, order_id: &str) -> Result<SubmitOutcome, ClientError> {
        let entry = self
            .entry(order_id)
            .ok_or_else(|| ClientError::Validation(format!("no review dialog for order {order_id}")))?;

        let Some(form) = entry.draft.to_form() else {
            tracing::debug!(order_id, "Review submitted without a rating");
            self.notifier.error(MISSING_RATING_MESSAGE);
            return Ok(SubmitOutcome::Invalid(MISSING_RATING_MESSAGE.into()));
        };

        let outcome = self
            .workflow
            .submit(Endpoint::SubmitReview, form, Some(&entry.modal), &entry.trigger)
            .await;

        if outcome.is_success() {
            self.reset_draft(order_id);
        }
        Ok(outcome)
    }

    fn reset_draft(&self, order_id: &str) {
        if let Some(entry) = self.lock().get_mut(order_id) {
            entry.draft = ReviewDraft::new(order_id);
        }
    }

    fn with_entry<T>(
        &self,
        order_id: &str,
        f: impl FnOnce(&mut ReviewEntry) -> T,
    ) -> Result<T, ClientError> {
        let mut entries = self.lock();
        let entry = entries
            .get_mut(order_id)
            .ok_or_else(|| ClientError::Validation(format!("no review dialog for order {order_id}")))?;
        Ok(f(entry))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ReviewEntry>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}
