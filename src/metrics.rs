use metrics::{counter, describe_counter};

use crate::storefront::Endpoint;

const ENDPOINTS: [Endpoint; 3] = [
    Endpoint::PlaceOrder,
    Endpoint::SubmitReview,
    Endpoint::UpdateOrderStatus,
];

/// Describe and zero all client metrics against whatever recorder the
/// host application installed. Without a recorder this is a no-op.
pub fn register_metrics() {
    describe_counter!("submissions_total", "Form submissions sent to the storefront");
    describe_counter!("submissions_failed", "Submissions that failed in transport");
    describe_counter!("submissions_rejected", "Submissions the storefront answered with success=false");
    describe_counter!("notifications_shown", "Notifications added to the container");
    describe_counter!("validation_failures", "Submissions cancelled by required-field validation");

    // Pre-register counters so they appear even before the first increment.
    for endpoint in ENDPOINTS {
        counter!("submissions_total", "action" => endpoint.as_str()).absolute(0);
        counter!("submissions_failed", "action" => endpoint.as_str()).absolute(0);
        counter!("submissions_rejected", "action" => endpoint.as_str()).absolute(0);
    }
    counter!("notifications_shown", "kind" => "success").absolute(0);
    counter!("notifications_shown", "kind" => "error").absolute(0);
    counter!("validation_failures").absolute(0);
}
