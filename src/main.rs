use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::sync::Notify;
use uuid::Uuid;

use agriconnect::config::ClientConfig;
use agriconnect::models::{Notification, OrderStatus, Rating};
use agriconnect::storefront::HttpStorefront;
use agriconnect::ui::{ModalId, OrderFormView, Ui};
use agriconnect::{Page, PageContext, SubmitOutcome};

#[derive(Parser, Debug)]
#[command(name = "agriconnect", version, about = "Place orders, reviews and status updates on an AgriConnect storefront")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place an order for a product
    Order {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        /// Units in stock
        #[arg(long)]
        stock: u32,
        /// Raw quantity input, coerced like the page does
        #[arg(long, default_value = "1")]
        quantity: String,
    },
    /// Review a completed order
    Review {
        #[arg(long)]
        order_id: String,
        /// 1 to 5; omitted means no rating selected
        #[arg(long)]
        rating: Option<Rating>,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Change an order's status
    Status {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        status: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Terminal stand-in for the page: prints dialogs and notifications,
/// prompts on stdin for confirmations.
struct TerminalUi {
    assume_yes: bool,
    printed: Mutex<HashSet<Uuid>>,
    reloaded: Notify,
}

impl TerminalUi {
    fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            printed: Mutex::new(HashSet::new()),
            reloaded: Notify::new(),
        }
    }
}

impl Ui for TerminalUi {
    fn show_modal(&self, modal: &ModalId) {
        tracing::debug!(%modal, "show modal");
    }

    fn hide_modal(&self, modal: &ModalId) {
        tracing::debug!(%modal, "hide modal");
    }

    fn render_order_form(&self, form: &OrderFormView) {
        println!(
            "{} (#{}) price {} | stock {} | quantity {} | total {}",
            form.product_name, form.product_id, form.price, form.stock, form.quantity, form.total
        );
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn reload(&self) {
        tracing::info!("View reload requested");
        self.reloaded.notify_one();
    }

    fn set_nav_active(&self, _href: &str, _active: bool) {}

    fn init_tooltip(&self, _element: &str) {}

    fn set_field_invalid(&self, field: &str, invalid: bool) {
        if invalid {
            eprintln!("required field is empty: {field}");
        }
    }

    fn set_trigger_enabled(&self, trigger: &str, enabled: bool) {
        tracing::trace!(trigger, enabled, "trigger state");
    }

    fn render_notifications(&self, visible: &[Notification]) {
        let mut printed = self.printed.lock().unwrap_or_else(|p| p.into_inner());
        for notification in visible {
            if printed.insert(notification.id) {
                println!("{notification}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    agriconnect::metrics::register_metrics();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    let assume_yes = matches!(cli.command, Command::Status { yes: true, .. });
    let ui = Arc::new(TerminalUi::new(assume_yes));
    let storefront = Arc::new(HttpStorefront::from_config(&config)?);
    tracing::info!(base_url = storefront.base_url(), "Using storefront");

    let mut context = PageContext::default();
    if let Command::Review { order_id, .. } = &cli.command {
        context.review_order_ids.push(order_id.clone());
    }
    let page = Page::init(&config, storefront, ui.clone(), &context);

    let outcome = match cli.command {
        Command::Order {
            product_id,
            name,
            price,
            stock,
            quantity,
        } => {
            page.orders.open_order_draft(&product_id, &name, price, stock)?;
            page.orders.on_quantity_change(&quantity);
            page.orders.place_order().await?
        }
        Command::Review {
            order_id,
            rating,
            comment,
        } => {
            page.reviews.open_review_draft(&order_id)?;
            if let Some(rating) = rating {
                page.reviews.select_rating(&order_id, rating)?;
            }
            page.reviews.set_comment(&order_id, &comment)?;
            page.reviews.submit_review(&order_id).await?
        }
        Command::Status {
            order_id, status, ..
        } => {
            page.status
                .request_status_change(&order_id, OrderStatus::from_str(&status))
                .await
        }
    };

    match outcome {
        SubmitOutcome::Succeeded => {
            // Wait for the scheduled reload so its log line is not lost.
            let wait = config.reload_delay * 2;
            if tokio::time::timeout(wait, ui.reloaded.notified()).await.is_err() {
                tracing::warn!("Reload was not triggered in time");
            }
            Ok(())
        }
        SubmitOutcome::Declined => {
            tracing::info!("Nothing sent");
            Ok(())
        }
        other => anyhow::bail!("submission did not succeed: {other:?}"),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
