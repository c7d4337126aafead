pub mod notifier;
pub mod submit;

pub use notifier::NotificationManager;
pub use submit::{InFlight, SubmitOutcome, SubmitWorkflow};
