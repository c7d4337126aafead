use std::sync::Arc;

use super::order_modal::OrderModal;
use super::review_modal::ReviewRegistry;
use super::status_update::StatusUpdater;
use super::validation::FormValidator;
use crate::config::ClientConfig;
use crate::services::{NotificationManager, SubmitWorkflow};
use crate::storefront::Storefront;
use crate::ui::Ui;

/// What the rendered page exposes at load time.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub current_path: String,
    /// `href` of every navbar link.
    pub nav_links: Vec<String>,
    /// Elements carrying `data-bs-toggle="tooltip"`.
    pub tooltip_elements: Vec<String>,
    /// Orders rendered with a review dialog.
    pub review_order_ids: Vec<String>,
}

/// Mark the link whose href equals `current_path` (exact match) active and
/// clear the rest. Returns the highlighted href.
pub fn highlight_active_nav<'a>(
    ui: &dyn Ui,
    current_path: &str,
    nav_links: &'a [String],
) -> Option<&'a str> {
    let mut active = None;
    for href in nav_links {
        let is_active = href == current_path;
        ui.set_nav_active(href, is_active);
        if is_active && active.is_none() {
            active = Some(href.as_str());
        }
    }
    active
}

/// Everything wired on page load. Built once; dropped with the page.
pub struct Page {
    pub notifier: NotificationManager,
    pub validator: FormValidator,
    pub orders: OrderModal,
    pub reviews: ReviewRegistry,
    pub status: StatusUpdater,
}

impl Page {
    pub fn init(
        config: &ClientConfig,
        storefront: Arc<dyn Storefront>,
        ui: Arc<dyn Ui>,
        context: &PageContext,
    ) -> Self {
        let active = highlight_active_nav(ui.as_ref(), &context.current_path, &context.nav_links);
        for element in &context.tooltip_elements {
            ui.init_tooltip(element);
        }

        let notifier = NotificationManager::from_config(Arc::clone(&ui), config);
        let workflow = SubmitWorkflow::new(
            storefront,
            Arc::clone(&ui),
            notifier.clone(),
            config.reload_delay,
        );
        let validator = FormValidator::new(Arc::clone(&ui), notifier.clone());

        let orders = OrderModal::new(
            Arc::clone(&ui),
            workflow.clone(),
            validator.clone(),
            config.currency_symbol.as_str(),
        );
        let reviews = ReviewRegistry::new(Arc::clone(&ui), workflow.clone());
        for order_id in &context.review_order_ids {
            reviews.register(order_id);
        }
        let status = StatusUpdater::new(ui, workflow);

        tracing::info!(
            path = %context.current_path,
            active_nav = ?active,
            tooltips = context.tooltip_elements.len(),
            reviews = reviews.len(),
            "AgriConnect initialized successfully!"
        );

        Self {
            notifier,
            validator,
            orders,
            reviews,
            status,
        }
    }
}
