use rust_decimal::{Decimal, RoundingStrategy};
use std::ops::RangeInclusive;

use super::FormData;
use crate::errors::ClientError;

/// Raw data attributes carried by an "order" button on a product card.
#[derive(Debug, Clone)]
pub struct OrderTrigger {
    pub product_id: String,
    pub product_name: String,
    /// `data-product-price`, e.g. `"250"` or `"19.5"`.
    pub price: String,
    /// `data-max-stock`, e.g. `"10"`.
    pub max_stock: String,
}

impl OrderTrigger {
    /// Parse the trigger's attributes into a fresh draft.
    pub fn parse(&self) -> Result<OrderDraft, ClientError> {
        let unit_price: Decimal = self.price.trim().parse().map_err(|_| {
            ClientError::Validation(format!("invalid product price: {:?}", self.price))
        })?;
        let max_stock: u32 = self.max_stock.trim().parse().map_err(|_| {
            ClientError::Validation(format!("invalid stock quantity: {:?}", self.max_stock))
        })?;
        OrderDraft::new(
            self.product_id.clone(),
            self.product_name.clone(),
            unit_price,
            max_stock,
        )
    }
}

/// Client-held, not yet submitted order for a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub max_stock: u32,
    /// As typed by the user; may fall outside `quantity_bounds()`.
    pub quantity: i64,
}

impl OrderDraft {
    /// A new draft starts at quantity 1.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit_price: Decimal,
        max_stock: u32,
    ) -> Result<Self, ClientError> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(ClientError::Validation(format!(
                "unit price must not be negative, got {unit_price}"
            )));
        }

        Ok(Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            unit_price,
            max_stock,
            quantity: 1,
        })
    }

    /// Bound applied to the quantity input. Empty when the product is out of stock.
    pub fn quantity_bounds(&self) -> RangeInclusive<u32> {
        1..=self.max_stock
    }

    pub fn quantity_in_bounds(&self) -> bool {
        u32::try_from(self.quantity)
            .map(|q| self.quantity_bounds().contains(&q))
            .unwrap_or(false)
    }

    /// Apply raw quantity input with permissive integer coercion.
    pub fn set_quantity_input(&mut self, raw: &str) {
        self.quantity = parse_quantity(raw);
    }

    /// quantity × unit price. Saturates instead of overflowing.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .unwrap_or(if self.quantity < 0 { Decimal::MIN } else { Decimal::MAX })
    }

    /// Payload for `POST /place_order`.
    pub fn to_form(&self) -> FormData {
        FormData::new()
            .append("productId", self.product_id.as_str())
            .append("productName", self.product_name.as_str())
            .append("price", format_amount(self.unit_price))
            .append("quantity", self.quantity.to_string())
    }
}

/// Read a quantity the way a browser `parseInt` would: optional leading
/// whitespace and sign, then the longest run of ASCII digits. Anything
/// that does not start with a digit yields 0.
pub fn parse_quantity(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return 0;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Amount with exactly two decimals, e.g. `750.00`.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Amount with a currency prefix, e.g. `₹250.00`.
pub fn format_price(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{}", format_amount(amount))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
