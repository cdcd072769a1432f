use std::num::NonZeroU32;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Result type returned by the cart form helpers.
pub type CartFormResult<T> = Result<T, CartFormError>;

/// Errors that can occur while processing cart forms.
#[derive(Debug, Error)]
pub enum CartFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The requested quantity was zero.
    ///
    /// Setting a line to zero units is a removal, and removals are a
    /// separate request so the client can ask the shopper to confirm.
    #[error("quantity must be at least 1; remove the item instead")]
    ZeroQuantity,
}

/// Payload submitted when adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    /// Catalog identifier of the product to add.
    pub product_id: i32,
}

/// Payload submitted when changing the quantity of a cart line.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeQuantityForm {
    /// Requested number of units; must be at least 1.
    #[validate(range(min = 1))]
    pub quantity: u32,
}

impl ChangeQuantityForm {
    /// Validates the payload into a quantity the store accepts.
    pub fn into_quantity(self) -> CartFormResult<NonZeroU32> {
        self.validate()?;
        NonZeroU32::new(self.quantity).ok_or(CartFormError::ZeroQuantity)
    }
}
