use std::num::NonZeroU32;

use crate::domain::cart::{CartLine, CartSnapshot};
use crate::domain::product::Product;

pub mod cart;
pub mod catalog;

#[cfg(test)]
pub mod mock;

pub use cart::{CartStore, SubscriptionId};
pub use catalog::StaticCatalog;

/// Read-only operations over the product catalog.
pub trait ProductReader {
    /// Look up a single product by its identifier.
    fn get_product_by_id(&self, id: i32) -> Option<Product>;
    /// List all products in catalog order.
    fn list_products(&self) -> Vec<Product>;
}

/// Read operations over the current cart state.
///
/// All readers hand out owned copies: mutating a returned value never
/// changes the underlying cart.
pub trait CartReader {
    /// Copy of the full cart state with its total.
    fn snapshot(&self) -> CartSnapshot;
    /// Copy of the cart lines in insertion order.
    fn lines(&self) -> Vec<CartLine>;
    /// Number of lines currently in the cart.
    fn line_count(&self) -> usize;
    /// Whether the cart holds no lines.
    fn is_empty(&self) -> bool;
    /// Sum of all line totals, recomputed from the current lines.
    fn total_cents(&self) -> i64;
}

/// Mutation operations over the current cart state.
///
/// Every operation is total: mutating with an unknown `product_id` is a
/// silent no-op, never an error, and callers must not rely on these calls
/// to learn whether a line existed.
pub trait CartWriter {
    /// Add one unit of `product`, creating a line or bumping the existing one.
    fn add_product(&self, product: &Product);
    /// Replace the quantity of the line for `product_id`, if present.
    fn update_quantity(&self, product_id: i32, quantity: NonZeroU32);
    /// Remove the line for `product_id`, if present.
    fn remove_product(&self, product_id: i32);
    /// Remove all lines.
    fn clear(&self);
}
