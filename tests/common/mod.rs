//! Helpers for integration tests.

use storefront::repository::StaticCatalog;

/// Catalog mirroring the storefront's demo product line-up.
pub fn sample_catalog() -> StaticCatalog {
    let csv = "\
id,name,price,currency,image
1,Modern Chair,100.00,USD,modern.png
2,Luxury Sofa,200.00,USD,sofa.png
3,Wooden Table,300.00,USD,tablepng.png
4,Cozy Armchair,400.00,USD,armchair.png
5,Office Desk,500.00,USD,office.png
";

    StaticCatalog::from_reader(csv.as_bytes()).expect("sample catalog should load")
}
