use std::fmt;

use super::FormData;

/// Order lifecycle states understood by the storefront server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Completed,
    Cancelled,
    /// Any other status string a page emits; forwarded verbatim.
    Other(String),
}

impl OrderStatus {
    /// Exact, case-sensitive match; anything else is kept as typed so the
    /// server stores the value it was given.
    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "shipped" => OrderStatus::Shipped,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status change awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangeRequest {
    pub order_id: String,
    pub new_status: OrderStatus,
}

impl StatusChangeRequest {
    pub fn new(order_id: impl Into<String>, new_status: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            new_status,
        }
    }

    pub fn confirmation_prompt(&self) -> String {
        format!("Are you sure you want to {} this order?", self.new_status)
    }

    /// Payload for `POST /update_order_status`.
    pub fn to_form(&self) -> FormData {
        FormData::new()
            .append("order_id", self.order_id.as_str())
            .append("status", self.new_status.as_str())
    }
}
