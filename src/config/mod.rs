use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::errors::ClientError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Storefront server, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,

    // Notifications
    pub notification_display: Duration,
    pub notification_max_visible: usize,

    // Submit-and-refresh
    pub reload_delay: Duration,
    /// `None` leaves the HTTP client's own defaults in place.
    pub request_timeout: Option<Duration>,

    pub currency_symbol: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            notification_display: Duration::from_millis(3_000),
            notification_max_visible: 5,
            reload_delay: Duration::from_millis(1_000),
            request_timeout: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let notification_display = match env::var("NOTIFICATION_DISPLAY_MS") {
            Ok(v) => Duration::from_millis(v.trim().parse()?),
            Err(_) => defaults.notification_display,
        };
        let reload_delay = match env::var("RELOAD_DELAY_MS") {
            Ok(v) => Duration::from_millis(v.trim().parse()?),
            Err(_) => defaults.reload_delay,
        };
        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => Some(Duration::from_secs(v.trim().parse()?)),
            Err(_) => None,
        };
        let notification_max_visible = match env::var("NOTIFICATION_MAX_VISIBLE") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("invalid NOTIFICATION_MAX_VISIBLE: {v:?}"))?,
            Err(_) => defaults.notification_max_visible,
        };

        let config = Self {
            base_url: env::var("AGRICONNECT_BASE_URL").unwrap_or(defaults.base_url),
            notification_display,
            notification_max_visible,
            reload_delay,
            request_timeout,
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.notification_max_visible == 0 {
            return Err(ClientError::Config(
                "NOTIFICATION_MAX_VISIBLE must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
