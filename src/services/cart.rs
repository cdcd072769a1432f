use serde::Serialize;

use crate::domain::cart::{CartLine, CartSnapshot};
use crate::forms::cart::{AddToCartForm, ChangeQuantityForm};
use crate::repository::{CartReader, CartWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult, format_cents};

/// Data required to render the cart screen.
#[derive(Debug, Serialize)]
pub struct CartPageData {
    /// Cart lines in insertion order.
    pub lines: Vec<CartLineView>,
    /// Number of distinct products in the cart.
    pub line_count: usize,
    /// Cart total in the smallest currency unit.
    pub total_cents: i64,
    /// Cart total formatted for display.
    pub total_formatted: String,
    /// Whether the cart holds no lines.
    pub is_empty: bool,
}

impl From<CartSnapshot> for CartPageData {
    fn from(snapshot: CartSnapshot) -> Self {
        let CartSnapshot { lines, total_cents } = snapshot;

        let lines: Vec<CartLineView> = lines.into_iter().map(CartLineView::from).collect();

        Self {
            line_count: lines.len(),
            is_empty: lines.is_empty(),
            total_formatted: format_cents(total_cents),
            total_cents,
            lines,
        }
    }
}

/// View model for one line on the cart screen.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub line_total_formatted: String,
}

impl From<CartLine> for CartLineView {
    fn from(line: CartLine) -> Self {
        let line_total_cents = line.line_total_cents();

        Self {
            product_id: line.product_id,
            name: line.name,
            image: line.image,
            quantity: line.quantity.get(),
            unit_price_cents: line.price_cents,
            line_total_cents,
            line_total_formatted: format_cents(line_total_cents),
        }
    }
}

/// Loads the current cart contents for the cart screen.
pub fn load_cart_page<S>(store: &S) -> CartPageData
where
    S: CartReader + ?Sized,
{
    CartPageData::from(store.snapshot())
}

/// Adds one unit of a catalog product to the cart.
///
/// The product is resolved against the catalog first; an id the catalog
/// does not know is a `NotFound` error here, while the store itself never
/// fails.
pub fn add_to_cart<C, S>(catalog: &C, store: &S, form: AddToCartForm) -> ServiceResult<CartPageData>
where
    C: ProductReader + ?Sized,
    S: CartReader + CartWriter + ?Sized,
{
    let product = catalog
        .get_product_by_id(form.product_id)
        .ok_or(ServiceError::NotFound)?;

    store.add_product(&product);

    Ok(load_cart_page(store))
}

/// Replaces the quantity of a cart line.
///
/// A quantity of zero is rejected at validation; a product id without a
/// matching line leaves the cart unchanged, and the call still succeeds.
pub fn change_quantity<S>(
    store: &S,
    product_id: i32,
    form: ChangeQuantityForm,
) -> ServiceResult<CartPageData>
where
    S: CartReader + CartWriter + ?Sized,
{
    let quantity = form
        .into_quantity()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    store.update_quantity(product_id, quantity);

    Ok(load_cart_page(store))
}

/// Removes a line from the cart.
///
/// Succeeds whether or not the line existed; callers wanting to know must
/// inspect the returned page data.
pub fn remove_item<S>(store: &S, product_id: i32) -> CartPageData
where
    S: CartReader + CartWriter + ?Sized,
{
    store.remove_product(product_id);

    load_cart_page(store)
}
