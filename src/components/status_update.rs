use std::sync::Arc;

use crate::models::{OrderStatus, StatusChangeRequest};
use crate::services::{SubmitOutcome, SubmitWorkflow};
use crate::storefront::Endpoint;
use crate::ui::Ui;

/// Confirm-then-submit action on an order row.
pub struct StatusUpdater {
    ui: Arc<dyn Ui>,
    workflow: SubmitWorkflow,
}

impl StatusUpdater {
    pub fn new(ui: Arc<dyn Ui>, workflow: SubmitWorkflow) -> Self {
        Self { ui, workflow }
    }

    /// Ask the user to confirm, then POST to `/update_order_status`.
    /// Declining sends nothing.
    pub async fn request_status_change(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> SubmitOutcome {
        let request = StatusChangeRequest::new(order_id, new_status);

        if !self.ui.confirm(&request.confirmation_prompt()) {
            tracing::info!(order_id, status = %request.new_status, "Status change declined");
            return SubmitOutcome::Declined;
        }

        let key = format!("status:{order_id}");
        self.workflow
            .submit(Endpoint::UpdateOrderStatus, request.to_form(), None, &key)
            .await
    }
}
