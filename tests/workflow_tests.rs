mod common;

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::Semaphore;

use agriconnect::models::{NotificationKind, OrderStatus, OrderTrigger, Rating};
use agriconnect::storefront::Endpoint;
use agriconnect::{ClientError, SubmitOutcome};

use common::{build_page, RecordingUi, Reply, ScriptedStorefront, UiEvent};

fn messages(page: &agriconnect::Page) -> Vec<(NotificationKind, String)> {
    page.notifier
        .visible()
        .into_iter()
        .map(|n| (n.kind, n.message))
        .collect()
}

// ---------------------------------------------------------------------------
// Page init
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_init_highlights_nav_and_tooltips() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![]));
    let page = build_page(storefront, ui.clone(), &["7", "8"]);

    assert_eq!(
        ui.events(),
        vec![
            UiEvent::Nav("/".into(), false),
            UiEvent::Nav("/products".into(), false),
            UiEvent::Nav("/buyer/dashboard".into(), true),
            UiEvent::Tooltip("help-quantity".into()),
        ]
    );
    assert_eq!(page.reviews.len(), 2);
    assert!(page.notifier.is_empty());
}

// ---------------------------------------------------------------------------
// Order modal
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_order_draft_fields_and_live_total() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![]));
    let page = build_page(storefront, ui.clone(), &[]);

    page.orders
        .open_order_draft("42", "Rice 5kg", Decimal::from(250), 10)
        .unwrap();

    let view = ui.last_order_form().unwrap();
    assert_eq!(view.product_id, "42");
    assert_eq!(view.product_name, "Rice 5kg");
    assert_eq!(view.price, "₹250.00");
    assert_eq!(view.stock, "10 units");
    assert_eq!(view.quantity, "1");
    assert_eq!(view.quantity_max, 10);
    assert_eq!(view.total, "250.00");
    assert_eq!(ui.count(&UiEvent::Show("orderModal".into())), 1);

    assert_eq!(page.orders.on_quantity_change("3"), Some(Decimal::from(750)));
    assert_eq!(ui.last_order_form().unwrap().total, "750.00");

    assert_eq!(page.orders.on_quantity_change("abc"), Some(Decimal::ZERO));
    assert_eq!(ui.last_order_form().unwrap().total, "0.00");
}

#[tokio::test(start_paused = true)]
async fn test_quantity_change_without_draft() {
    let ui = Arc::new(RecordingUi::new(true));
    let page = build_page(Arc::new(ScriptedStorefront::new(vec![])), ui, &[]);
    assert_eq!(page.orders.on_quantity_change("3"), None);
}

#[tokio::test(start_paused = true)]
async fn test_open_from_trigger_attributes() {
    let ui = Arc::new(RecordingUi::new(true));
    let page = build_page(Arc::new(ScriptedStorefront::new(vec![])), ui.clone(), &[]);

    let trigger = OrderTrigger {
        product_id: "5".into(),
        product_name: "Tomatoes".into(),
        price: "39.5".into(),
        max_stock: "4".into(),
    };
    page.orders.open_from_trigger(&trigger).unwrap();
    assert_eq!(ui.last_order_form().unwrap().price, "₹39.50");

    let broken = OrderTrigger {
        price: "free".into(),
        ..trigger
    };
    assert!(matches!(
        page.orders.open_from_trigger(&broken),
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_place_order_success_closes_and_reloads() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    page.orders
        .open_order_draft("42", "Rice 5kg", Decimal::from(250), 10)
        .unwrap();
    page.orders.on_quantity_change("3");

    let outcome = page.orders.place_order().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Succeeded);

    let calls = storefront.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Endpoint::PlaceOrder);
    assert_eq!(calls[0].1.get("productId"), Some("42"));
    assert_eq!(calls[0].1.get("productName"), Some("Rice 5kg"));
    assert_eq!(calls[0].1.get("price"), Some("250.00"));
    assert_eq!(calls[0].1.get("quantity"), Some("3"));

    assert_eq!(
        messages(&page),
        vec![(NotificationKind::Success, "Order placed successfully!".to_string())]
    );
    assert_eq!(ui.count(&UiEvent::Hide("orderModal".into())), 1);
    assert!(page.orders.draft().is_none());

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(ui.count(&UiEvent::Reload), 0);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(ui.count(&UiEvent::Reload), 1);
}

#[tokio::test(start_paused = true)]
async fn test_place_order_blank_quantity_is_not_sent() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    page.orders
        .open_order_draft("42", "Rice 5kg", Decimal::from(250), 10)
        .unwrap();
    page.orders.on_quantity_change("  ");

    let outcome = page.orders.place_order().await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Invalid("Please fill in all required fields".into())
    );
    assert!(storefront.calls().is_empty());
    assert_eq!(ui.count(&UiEvent::FieldInvalid("quantity".into(), true)), 1);
    assert!(page.orders.draft().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_place_order_without_draft() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![]));
    let page = build_page(storefront.clone(), ui, &[]);

    assert!(matches!(
        page.orders.place_order().await,
        Err(ClientError::Validation(_))
    ));
    assert!(storefront.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_place_order_transport_failure_keeps_dialog_open() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::Decode("boom".into())]));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    page.orders
        .open_order_draft("42", "Rice 5kg", Decimal::from(250), 10)
        .unwrap();
    let outcome = page.orders.place_order().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(
        messages(&page),
        vec![(
            NotificationKind::Error,
            "Error placing order: unexpected response: boom".to_string()
        )]
    );
    assert_eq!(ui.count(&UiEvent::Hide("orderModal".into())), 0);
    assert!(page.orders.draft().is_some());

    tokio::time::sleep(Duration::from_millis(5_000)).await;
    assert_eq!(ui.count(&UiEvent::Reload), 0);
    assert!(page.notifier.is_empty());
    assert_eq!(storefront.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_discards_draft() {
    let ui = Arc::new(RecordingUi::new(true));
    let page = build_page(Arc::new(ScriptedStorefront::new(vec![])), ui.clone(), &[]);

    page.orders
        .open_order_draft("42", "Rice 5kg", Decimal::from(250), 10)
        .unwrap();
    page.orders.close();
    assert!(page.orders.draft().is_none());
    assert_eq!(ui.count(&UiEvent::Hide("orderModal".into())), 1);

    // Closing again is a no-op.
    page.orders.close();
    assert_eq!(ui.count(&UiEvent::Hide("orderModal".into())), 1);
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_submit_review_success() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui.clone(), &["7"]);

    page.reviews.open_review_draft("7").unwrap();
    assert_eq!(ui.count(&UiEvent::Show("reviewModal7".into())), 1);

    page.reviews.select_rating("7", Rating::new(5).unwrap()).unwrap();
    page.reviews.set_comment("7", "Great").unwrap();

    let outcome = page.reviews.submit_review("7").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Succeeded);

    let calls = storefront.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Endpoint::SubmitReview);
    assert_eq!(calls[0].1.get("order_id"), Some("7"));
    assert_eq!(calls[0].1.get("rating"), Some("5"));
    assert_eq!(calls[0].1.get("comment"), Some("Great"));

    assert_eq!(ui.count(&UiEvent::Hide("reviewModal7".into())), 1);
    assert_eq!(
        messages(&page),
        vec![(NotificationKind::Success, "Review submitted successfully!".to_string())]
    );
    assert!(page.reviews.entry("7").unwrap().draft.rating.is_none());

    tokio::time::sleep(Duration::from_millis(1_001)).await;
    assert_eq!(ui.count(&UiEvent::Reload), 1);
}

#[tokio::test(start_paused = true)]
async fn test_submit_review_without_rating_sends_nothing() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui.clone(), &["7"]);

    page.reviews.set_comment("7", "Great").unwrap();
    let outcome = page.reviews.submit_review("7").await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid("Please select a rating".into()));
    assert!(storefront.calls().is_empty());
    assert_eq!(
        messages(&page),
        vec![(NotificationKind::Error, "Please select a rating".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_review_entries_are_per_order() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui, &["7", "8"]);

    page.reviews.select_rating("8", Rating::new(3).unwrap()).unwrap();

    let entry = page.reviews.entry("7").unwrap();
    assert!(entry.draft.rating.is_none());
    assert_eq!(entry.modal.as_str(), "reviewModal7");
    assert_eq!(entry.comment_field, "comment-7");
    assert_eq!(entry.rating_group, "rating-7");

    let outcome = page.reviews.submit_review("7").await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(storefront.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_review_order() {
    let ui = Arc::new(RecordingUi::new(true));
    let page = build_page(Arc::new(ScriptedStorefront::new(vec![])), ui, &["7"]);

    assert!(matches!(
        page.reviews.open_review_draft("99"),
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        page.reviews.submit_review("99").await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_review_rejected_by_server() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::rejected(
        "You have already reviewed this order",
    )]));
    let page = build_page(storefront, ui.clone(), &["7"]);

    page.reviews.select_rating("7", Rating::new(4).unwrap()).unwrap();
    let outcome = page.reviews.submit_review("7").await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected("You have already reviewed this order".into())
    );
    assert_eq!(ui.count(&UiEvent::Hide("reviewModal7".into())), 0);
    // Draft survives so the user can retry by hand.
    assert_eq!(page.reviews.entry("7").unwrap().draft.rating, Rating::new(4));
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_declined_status_change_sends_nothing() {
    let ui = Arc::new(RecordingUi::new(false));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    let outcome = page
        .status
        .request_status_change("9", OrderStatus::Cancelled)
        .await;

    assert_eq!(outcome, SubmitOutcome::Declined);
    assert!(storefront.calls().is_empty());
    assert_eq!(
        ui.count(&UiEvent::Confirm(
            "Are you sure you want to cancelled this order?".into()
        )),
        1
    );
    assert!(page.notifier.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_status_change_rejected_no_reload() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::rejected("Already shipped")]));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    let outcome = page
        .status
        .request_status_change("9", OrderStatus::Cancelled)
        .await;

    assert_eq!(outcome, SubmitOutcome::Rejected("Already shipped".into()));
    let calls = storefront.calls();
    assert_eq!(calls[0].0, Endpoint::UpdateOrderStatus);
    assert_eq!(calls[0].1.get("order_id"), Some("9"));
    assert_eq!(calls[0].1.get("status"), Some("cancelled"));
    assert_eq!(
        messages(&page),
        vec![(NotificationKind::Error, "Error: Already shipped".to_string())]
    );

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    assert_eq!(ui.count(&UiEvent::Reload), 0);
}

#[tokio::test(start_paused = true)]
async fn test_status_change_success_reloads() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront, ui.clone(), &[]);

    let outcome = page
        .status
        .request_status_change("9", OrderStatus::Shipped)
        .await;
    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(
        messages(&page),
        vec![(NotificationKind::Success, "Order status updated!".to_string())]
    );

    tokio::time::sleep(Duration::from_millis(1_001)).await;
    assert_eq!(ui.count(&UiEvent::Reload), 1);
}

#[tokio::test(start_paused = true)]
async fn test_status_posted_as_typed() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![Reply::success()]));
    let page = build_page(storefront.clone(), ui, &[]);

    let outcome = page
        .status
        .request_status_change("9", OrderStatus::from_str("Completed"))
        .await;
    assert_eq!(outcome, SubmitOutcome::Succeeded);

    let calls = storefront.calls();
    assert_eq!(calls[0].0, Endpoint::UpdateOrderStatus);
    assert_eq!(calls[0].1.get("status"), Some("Completed"));
}

// ---------------------------------------------------------------------------
// In-flight guard and notification bound
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_duplicate_submit_while_pending_is_refused() {
    let ui = Arc::new(RecordingUi::new(true));
    let gate = Arc::new(Semaphore::new(0));
    let storefront = Arc::new(ScriptedStorefront::gated(
        vec![Reply::success(), Reply::success()],
        gate.clone(),
    ));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    let (first, second, _) = tokio::join!(
        page.status.request_status_change("9", OrderStatus::Shipped),
        page.status.request_status_change("9", OrderStatus::Shipped),
        async {
            tokio::task::yield_now().await;
            gate.add_permits(1);
        }
    );

    let mut outcomes = vec![first, second];
    outcomes.sort_by_key(|o| matches!(o, SubmitOutcome::AlreadyPending));
    assert_eq!(
        outcomes,
        vec![SubmitOutcome::Succeeded, SubmitOutcome::AlreadyPending]
    );
    assert_eq!(storefront.calls().len(), 1);
    assert_eq!(
        ui.count(&UiEvent::Trigger("status:9".into(), false)),
        1
    );
    assert_eq!(ui.count(&UiEvent::Trigger("status:9".into(), true)), 1);

    // Once resolved, the same draft can be submitted again.
    gate.add_permits(1);
    let again = page
        .status
        .request_status_change("9", OrderStatus::Shipped)
        .await;
    assert_eq!(again, SubmitOutcome::Succeeded);
    assert_eq!(storefront.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_submit_releases_trigger() {
    let ui = Arc::new(RecordingUi::new(true));
    let gate = Arc::new(Semaphore::new(0));
    let storefront = Arc::new(ScriptedStorefront::gated(
        vec![Reply::success()],
        gate.clone(),
    ));
    let page = build_page(storefront.clone(), ui.clone(), &[]);

    let abandoned = tokio::time::timeout(
        Duration::from_secs(30),
        page.status.request_status_change("9", OrderStatus::Shipped),
    )
    .await;
    assert!(abandoned.is_err());
    assert_eq!(ui.count(&UiEvent::Trigger("status:9".into(), false)), 1);
    assert_eq!(ui.count(&UiEvent::Trigger("status:9".into(), true)), 1);

    gate.add_permits(1);
    let retried = page
        .status
        .request_status_change("9", OrderStatus::Shipped)
        .await;
    assert_eq!(retried, SubmitOutcome::Succeeded);
    assert_eq!(storefront.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_notifications_are_bounded() {
    let ui = Arc::new(RecordingUi::new(true));
    let storefront = Arc::new(ScriptedStorefront::new(vec![]));
    let page = build_page(storefront, ui, &["7"]);

    for _ in 0..8 {
        page.reviews.submit_review("7").await.unwrap();
    }
    assert_eq!(page.notifier.len(), 5);

    tokio::time::sleep(Duration::from_millis(3_001)).await;
    assert!(page.notifier.is_empty());
}
