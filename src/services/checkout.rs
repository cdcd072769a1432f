use serde::Serialize;

use crate::repository::{CartReader, CartWriter};
use crate::services::cart::CartPageData;
use crate::services::{ServiceError, ServiceResult, format_cents};

/// Confirmation returned once an order has been placed.
#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    /// Number of distinct products in the order.
    pub line_count: usize,
    /// Order total in the smallest currency unit.
    pub total_cents: i64,
    /// Order total formatted for display.
    pub total_formatted: String,
    /// Message shown to the shopper.
    pub message: String,
}

/// Loads the order summary for the checkout screen.
pub fn load_checkout_page<S>(store: &S) -> CartPageData
where
    S: CartReader + ?Sized,
{
    CartPageData::from(store.snapshot())
}

/// Confirms the order and clears the cart.
///
/// The confirmation captures the cart contents before the single
/// `clear()` call; an empty cart cannot be checked out.
pub fn place_order<S>(store: &S) -> ServiceResult<OrderConfirmation>
where
    S: CartReader + CartWriter + ?Sized,
{
    let snapshot = store.snapshot();
    if snapshot.is_empty() {
        return Err(ServiceError::EmptyCart);
    }

    store.clear();

    log::info!(
        "Order placed: {} lines, total {} cents",
        snapshot.line_count(),
        snapshot.total_cents
    );

    Ok(OrderConfirmation {
        line_count: snapshot.line_count(),
        total_formatted: format_cents(snapshot.total_cents),
        total_cents: snapshot.total_cents,
        message: "Thank you for your purchase!".to_string(),
    })
}
