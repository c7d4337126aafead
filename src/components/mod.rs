pub mod order_modal;
pub mod page;
pub mod review_modal;
pub mod status_update;
pub mod validation;

pub use order_modal::OrderModal;
pub use page::{highlight_active_nav, Page, PageContext};
pub use review_modal::{ReviewEntry, ReviewRegistry};
pub use status_update::StatusUpdater;
pub use validation::{FormField, FormValidator};
