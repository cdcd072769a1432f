use serde::{Deserialize, Serialize};

/// Domain representation of a product offered by the storefront.
///
/// Products are supplied by the catalog at startup and never change while
/// the process is running. Cart lines copy the fields they need at add
/// time, so a product value is safe to drop once it has been added.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product within the catalog.
    pub id: i32,
    /// Human-readable name shown to shoppers.
    pub name: String,
    /// Unit price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// ISO 4217 currency code associated with the product price.
    pub currency: String,
    /// Optional asset path of the product image, relative to the assets mount.
    pub image: Option<String>,
}

impl Product {
    /// Build a product with the supplied details and no image.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        price_cents: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price_cents,
            currency: currency.into(),
            image: None,
        }
    }

    /// Attach an image asset path to the product.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
