use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use agriconnect::config::ClientConfig;
use agriconnect::models::{ApiResponse, FormData};
use agriconnect::storefront::{Endpoint, Storefront, StorefrontError};
use agriconnect::{Page, PageContext};

pub use agriconnect::ui::testing::{RecordingUi, UiEvent};

// ---------------------------------------------------------------------------
// Scripted storefront
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub enum Reply {
    Ok(ApiResponse),
    Decode(String),
}

#[allow(dead_code)]
impl Reply {
    pub fn success() -> Self {
        Reply::Ok(ApiResponse {
            success: true,
            message: None,
        })
    }

    pub fn rejected(message: &str) -> Self {
        Reply::Ok(ApiResponse {
            success: false,
            message: Some(message.into()),
        })
    }
}

/// Answers each POST with the next scripted reply and records the call.
/// When gated, every request waits for a permit before replying.
#[allow(dead_code)]
pub struct ScriptedStorefront {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Endpoint, FormData)>>,
    gate: Option<Arc<Semaphore>>,
}

#[allow(dead_code)]
impl ScriptedStorefront {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(replies: Vec<Reply>, gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    pub fn calls(&self) -> Vec<(Endpoint, FormData)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storefront for ScriptedStorefront {
    async fn post_form(
        &self,
        endpoint: Endpoint,
        form: &FormData,
    ) -> Result<ApiResponse, StorefrontError> {
        self.calls.lock().unwrap().push((endpoint, form.clone()));
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Ok(resp)) => Ok(resp),
            Some(Reply::Decode(msg)) => Err(StorefrontError::Decode(msg)),
            None => Err(StorefrontError::Decode("no scripted reply".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub fn test_config() -> ClientConfig {
    ClientConfig {
        notification_display: Duration::from_millis(3_000),
        reload_delay: Duration::from_millis(1_000),
        ..ClientConfig::default()
    }
}

#[allow(dead_code)]
pub fn build_page(
    storefront: Arc<ScriptedStorefront>,
    ui: Arc<RecordingUi>,
    review_order_ids: &[&str],
) -> Page {
    let context = PageContext {
        current_path: "/buyer/dashboard".into(),
        nav_links: vec!["/".into(), "/products".into(), "/buyer/dashboard".into()],
        tooltip_elements: vec!["help-quantity".into()],
        review_order_ids: review_order_ids.iter().map(|s| s.to_string()).collect(),
    };
    Page::init(&test_config(), storefront, ui, &context)
}
