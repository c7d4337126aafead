use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutating endpoints exposed by the storefront server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    PlaceOrder,
    SubmitReview,
    UpdateOrderStatus,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PlaceOrder => "/place_order",
            Endpoint::SubmitReview => "/submit_review",
            Endpoint::UpdateOrderStatus => "/update_order_status",
        }
    }

    /// Short label used for metrics and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::PlaceOrder => "place_order",
            Endpoint::SubmitReview => "submit_review",
            Endpoint::UpdateOrderStatus => "update_order_status",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
