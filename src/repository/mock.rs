use std::num::NonZeroU32;

use mockall::mock;

use super::{CartReader, CartWriter, ProductReader};
use crate::domain::cart::{CartLine, CartSnapshot};
use crate::domain::product::Product;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> Option<Product>;
        fn list_products(&self) -> Vec<Product>;
    }
}

mock! {
    pub CartReader {}

    impl CartReader for CartReader {
        fn snapshot(&self) -> CartSnapshot;
        fn lines(&self) -> Vec<CartLine>;
        fn line_count(&self) -> usize;
        fn is_empty(&self) -> bool;
        fn total_cents(&self) -> i64;
    }
}

mock! {
    pub CartWriter {}

    impl CartWriter for CartWriter {
        fn add_product(&self, product: &Product);
        fn update_quantity(&self, product_id: i32, quantity: NonZeroU32);
        fn remove_product(&self, product_id: i32);
        fn clear(&self);
    }
}
