use std::sync::Arc;

use metrics::counter;

use crate::errors::ClientError;
use crate::services::NotificationManager;
use crate::ui::Ui;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// One input of a form being submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub value: String,
    pub required: bool,
}

impl FormField {
    pub fn required(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            required: true,
        }
    }

    pub fn optional(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            required: false,
        }
    }

    /// Required and blank (whitespace only counts as blank).
    pub fn is_missing(&self) -> bool {
        self.required && self.value.trim().is_empty()
    }
}

/// Ids of required fields that are blank.
pub fn missing_required(fields: &[FormField]) -> Vec<&str> {
    fields
        .iter()
        .filter(|f| f.is_missing())
        .map(|f| f.id.as_str())
        .collect()
}

/// Local required-field check run on every submission attempt.
#[derive(Clone)]
pub struct FormValidator {
    ui: Arc<dyn Ui>,
    notifier: NotificationManager,
}

impl FormValidator {
    pub fn new(ui: Arc<dyn Ui>, notifier: NotificationManager) -> Self {
        Self { ui, notifier }
    }

    /// Flag blank required fields and clear the flag on filled ones.
    /// Any blank required field cancels the submission with a single
    /// notification. Usable outside a Tokio runtime; the notification then
    /// stays until evicted or dismissed.
    pub fn validate(&self, fields: &[FormField]) -> Result<(), ClientError> {
        for field in fields.iter().filter(|f| f.required) {
            self.ui.set_field_invalid(&field.id, field.is_missing());
        }

        let missing = missing_required(fields);
        if missing.is_empty() {
            return Ok(());
        }

        counter!("validation_failures").increment(1);
        tracing::debug!(fields = ?missing, "Required fields missing");
        self.notifier.error(REQUIRED_FIELDS_MESSAGE);
        Err(ClientError::Validation(REQUIRED_FIELDS_MESSAGE.into()))
    }
}
