pub mod client;
pub mod types;

pub use client::{HttpStorefront, StorefrontError};
pub use types::Endpoint;

use async_trait::async_trait;

use crate::models::{ApiResponse, FormData};

/// Server side of the storefront, reached only through form POSTs.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// POST `form` to `endpoint` and decode the `{success, message}` reply.
    async fn post_form(
        &self,
        endpoint: Endpoint,
        form: &FormData,
    ) -> Result<ApiResponse, StorefrontError>;
}
