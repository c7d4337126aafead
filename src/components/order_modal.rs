use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;

use super::validation::{FormField, FormValidator};
use crate::errors::ClientError;
use crate::models::{format_amount, format_price, OrderDraft, OrderTrigger};
use crate::services::{SubmitOutcome, SubmitWorkflow};
use crate::storefront::Endpoint;
use crate::ui::{ModalId, OrderFormView, Ui};

/// In-flight key of the single order dialog.
pub const ORDER_TRIGGER: &str = "order";

#[derive(Debug, Clone)]
struct OpenOrder {
    draft: OrderDraft,
    /// Quantity input exactly as typed.
    quantity_input: String,
}

/// The order dialog: one draft at a time, live total, submit.
pub struct OrderModal {
    open: Mutex<Option<OpenOrder>>,
    ui: Arc<dyn Ui>,
    workflow: SubmitWorkflow,
    validator: FormValidator,
    currency_symbol: String,
    modal: ModalId,
}

impl OrderModal {
    pub fn new(
        ui: Arc<dyn Ui>,
        workflow: SubmitWorkflow,
        validator: FormValidator,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            open: Mutex::new(None),
            ui,
            workflow,
            validator,
            currency_symbol: currency_symbol.into(),
            modal: ModalId::order(),
        }
    }

    /// Populate the dialog for a product and show it. Quantity starts at 1.
    pub fn open_order_draft(
        &self,
        product_id: &str,
        product_name: &str,
        unit_price: Decimal,
        max_stock: u32,
    ) -> Result<(), ClientError> {
        let draft = OrderDraft::new(product_id, product_name, unit_price, max_stock)?;
        self.open_draft(draft);
        Ok(())
    }

    /// Same as [`open_order_draft`](Self::open_order_draft), from an order
    /// button's data attributes.
    pub fn open_from_trigger(&self, trigger: &OrderTrigger) -> Result<(), ClientError> {
        let draft = trigger.parse()?;
        self.open_draft(draft);
        Ok(())
    }

    fn open_draft(&self, draft: OrderDraft) {
        tracing::debug!(
            product_id = %draft.product_id,
            unit_price = %draft.unit_price,
            max_stock = draft.max_stock,
            "Opening order draft"
        );
        let open = OpenOrder {
            quantity_input: draft.quantity.to_string(),
            draft,
        };
        let view = self.view_of(&open);
        *self.lock() = Some(open);

        self.ui.render_order_form(&view);
        self.ui.show_modal(&self.modal);
    }

    /// Recompute the total from raw quantity input. Non-numeric input
    /// counts as 0. Returns the new total, or `None` with no open draft.
    pub fn on_quantity_change(&self, raw: &str) -> Option<Decimal> {
        let view = {
            let mut guard = self.lock();
            let open = guard.as_mut()?;
            open.draft.set_quantity_input(raw);
            open.quantity_input = raw.to_string();
            self.view_of(open)
        };
        self.ui.render_order_form(&view);
        self.draft().map(|d| d.total())
    }

    pub fn draft(&self) -> Option<OrderDraft> {
        self.lock().as_ref().map(|o| o.draft.clone())
    }

    pub fn form_view(&self) -> Option<OrderFormView> {
        self.lock().as_ref().map(|o| self.view_of(o))
    }

    /// Discard the draft and hide the dialog.
    pub fn close(&self) {
        if self.lock().take().is_some() {
            self.ui.hide_modal(&self.modal);
        }
    }

    /// Validate and POST the open draft to `/place_order`. The draft is
    /// discarded once the server accepts it.
    pub async fn place_order(&self) -> Result<SubmitOutcome, ClientError> {
        let Some(open) = self.lock().clone() else {
            return Err(ClientError::Validation("no order draft is open".into()));
        };

        let fields = [
            FormField::required("productId", open.draft.product_id.as_str()),
            FormField::required("productName", open.draft.product_name.as_str()),
            FormField::required("quantity", open.quantity_input.as_str()),
        ];
        if let Err(e) = self.validator.validate(&fields) {
            return Ok(SubmitOutcome::Invalid(e.user_message()));
        }

        let outcome = self
            .workflow
            .submit(
                Endpoint::PlaceOrder,
                open.draft.to_form(),
                Some(&self.modal),
                ORDER_TRIGGER,
            )
            .await;

        if outcome.is_success() {
            self.lock().take();
        }
        Ok(outcome)
    }

    fn view_of(&self, open: &OpenOrder) -> OrderFormView {
        let draft = &open.draft;
        OrderFormView {
            product_id: draft.product_id.clone(),
            product_name: draft.product_name.clone(),
            price: format_price(&self.currency_symbol, draft.unit_price),
            stock: format!("{} units", draft.max_stock),
            quantity: open.quantity_input.clone(),
            quantity_max: draft.max_stock,
            total: format_amount(draft.total()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<OpenOrder>> {
        self.open.lock().unwrap_or_else(|p| p.into_inner())
    }
}
