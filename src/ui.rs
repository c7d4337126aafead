use std::fmt;

use crate::models::Notification;

/// Identifier of a dialog on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModalId(String);

impl ModalId {
    pub fn order() -> Self {
        ModalId("orderModal".into())
    }

    pub fn review(order_id: &str) -> Self {
        ModalId(format!("reviewModal{order_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display values of the order dialog's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormView {
    pub product_id: String,
    pub product_name: String,
    /// e.g. `₹250.00`
    pub price: String,
    /// e.g. `10 units`
    pub stock: String,
    pub quantity: String,
    pub quantity_max: u32,
    /// e.g. `750.00`
    pub total: String,
}

/// The page toolkit: dialogs, form fields, prompts and reloads.
///
/// Calls happen on whatever task runs the workflow; implementations must
/// not block for long except in `confirm`, which is an explicit
/// user-facing prompt.
pub trait Ui: Send + Sync {
    fn show_modal(&self, modal: &ModalId);
    fn hide_modal(&self, modal: &ModalId);
    fn render_order_form(&self, form: &OrderFormView);
    fn confirm(&self, prompt: &str) -> bool;
    /// Re-fetch the whole current view.
    fn reload(&self);
    fn set_nav_active(&self, href: &str, active: bool);
    fn init_tooltip(&self, element: &str);
    fn set_field_invalid(&self, field: &str, invalid: bool);
    fn set_trigger_enabled(&self, trigger: &str, enabled: bool);
    /// Redraw the notification container with what is currently visible.
    fn render_notifications(&self, visible: &[Notification]);
}

/// Recording `Ui` for tests, shared by unit and integration tests.
pub mod testing {
    use std::sync::{Mutex, MutexGuard};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum UiEvent {
        Show(String),
        Hide(String),
        OrderForm(OrderFormView),
        Confirm(String),
        Reload,
        Nav(String, bool),
        Tooltip(String),
        FieldInvalid(String, bool),
        Trigger(String, bool),
        Notifications(Vec<String>),
    }

    /// Records every call; answers `confirm` with a fixed value.
    pub struct RecordingUi {
        events: Mutex<Vec<UiEvent>>,
        confirm_answer: bool,
    }

    impl RecordingUi {
        pub fn new(confirm_answer: bool) -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                confirm_answer,
            }
        }

        pub fn confirm_answer(&self) -> bool {
            self.confirm_answer
        }

        pub fn events(&self) -> Vec<UiEvent> {
            self.lock().clone()
        }

        pub fn count(&self, event: &UiEvent) -> usize {
            self.lock().iter().filter(|e| *e == event).count()
        }

        pub fn last_order_form(&self) -> Option<OrderFormView> {
            self.lock().iter().rev().find_map(|e| match e {
                UiEvent::OrderForm(view) => Some(view.clone()),
                _ => None,
            })
        }

        fn push(&self, event: UiEvent) {
            self.lock().push(event);
        }

        fn lock(&self) -> MutexGuard<'_, Vec<UiEvent>> {
            self.events.lock().unwrap_or_else(|p| p.into_inner())
        }
    }

    impl Ui for RecordingUi {
        fn show_modal(&self, modal: &ModalId) {
            self.push(UiEvent::Show(modal.to_string()));
        }
        fn hide_modal(&self, modal: &ModalId) {
            self.push(UiEvent::Hide(modal.to_string()));
        }
        fn render_order_form(&self, form: &OrderFormView) {
            self.push(UiEvent::OrderForm(form.clone()));
        }
        fn confirm(&self, prompt: &str) -> bool {
            self.push(UiEvent::Confirm(prompt.to_string()));
            self.confirm_answer
        }
        fn reload(&self) {
            self.push(UiEvent::Reload);
        }
        fn set_nav_active(&self, href: &str, active: bool) {
            self.push(UiEvent::Nav(href.to_string(), active));
        }
        fn init_tooltip(&self, element: &str) {
            self.push(UiEvent::Tooltip(element.to_string()));
        }
        fn set_field_invalid(&self, field: &str, invalid: bool) {
            self.push(UiEvent::FieldInvalid(field.to_string(), invalid));
        }
        fn set_trigger_enabled(&self, trigger: &str, enabled: bool) {
            self.push(UiEvent::Trigger(trigger.to_string(), enabled));
        }
        fn render_notifications(&self, visible: &[Notification]) {
            self.push(UiEvent::Notifications(
                visible.iter().map(|n| n.message.clone()).collect(),
            ));
        }
    }
}
