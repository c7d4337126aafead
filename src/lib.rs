pub mod components;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storefront;
pub mod ui;

pub use components::{Page, PageContext};
pub use config::ClientConfig;
pub use errors::ClientError;
pub use services::SubmitOutcome;
