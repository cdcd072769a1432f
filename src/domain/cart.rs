use std::num::NonZeroU32;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// One product entry in the cart paired with a quantity.
///
/// The product attributes are copied from the catalog when the line is
/// first created, so later catalog changes never affect items already in
/// the cart. A line always represents at least one unit: the quantity is
/// a [`NonZeroU32`], which makes "a line with quantity zero" unrepresentable.
/// Dropping the last unit of a product is a removal, not a quantity update.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Identifier of the catalog product this line was created from.
    pub product_id: i32,
    /// Product name captured at add time.
    pub name: String,
    /// Unit price in the smallest currency unit, captured at add time.
    pub price_cents: i64,
    /// ISO 4217 currency code captured at add time.
    pub currency: String,
    /// Product image asset path captured at add time.
    pub image: Option<String>,
    /// Number of units of the product in the cart.
    pub quantity: NonZeroU32,
    /// Timestamp for when the line was first added to the cart.
    pub added_at: NaiveDateTime,
}

impl CartLine {
    /// Create a line for a single unit of `product`.
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price_cents: product.price_cents,
            currency: product.currency.clone(),
            image: product.image.clone(),
            quantity: NonZeroU32::MIN,
            added_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Price of the line: unit price multiplied by quantity.
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * i64::from(self.quantity.get())
    }
}

/// Read-only copy of the cart state at one point in time.
///
/// Snapshots own their lines; mutating a snapshot never affects the store
/// it was taken from. The total is recomputed from the lines when the
/// snapshot is built rather than carried over from earlier state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    /// Cart lines in insertion order.
    pub lines: Vec<CartLine>,
    /// Sum of all line totals in the smallest currency unit.
    pub total_cents: i64,
}

impl CartSnapshot {
    /// Build a snapshot from owned lines, computing the total.
    pub fn new(lines: Vec<CartLine>) -> Self {
        let total_cents = lines.iter().map(CartLine::line_total_cents).sum();
        Self { lines, total_cents }
    }

    /// Number of lines in the snapshot.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the snapshot holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
