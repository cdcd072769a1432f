use serde::Serialize;

use crate::domain::product::Product;
use crate::repository::ProductReader;
use crate::services::format_cents;

/// Data required to render the home screen.
#[derive(Debug, Serialize)]
pub struct HomePageData {
    /// Products in catalog order.
    pub products: Vec<ProductView>,
}

/// View model for one product card on the home screen.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price_cents: i64,
    pub price_formatted: String,
    pub currency: String,
    pub image: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let Product {
            id,
            name,
            price_cents,
            currency,
            image,
        } = product;

        Self {
            id,
            name,
            price_formatted: format_cents(price_cents),
            price_cents,
            currency,
            image,
        }
    }
}

/// Loads the product overview for the home screen.
pub fn load_home_page<C>(catalog: &C) -> HomePageData
where
    C: ProductReader + ?Sized,
{
    let products = catalog
        .list_products()
        .into_iter()
        .map(ProductView::from)
        .collect();

    HomePageData { products }
}
