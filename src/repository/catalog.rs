use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{StringRecord, Trim};
use thiserror::Error;

use crate::domain::product::Product;
use crate::repository::ProductReader;

/// ISO 4217 currency codes are three ASCII alphabetic characters.
const CURRENCY_CODE_LEN: usize = 3;

/// Result type returned by the catalog loader.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building the product catalog.
///
/// All of these are load-time failures: once a catalog exists it can no
/// longer fail, so the process refuses to start instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parsing failures.
    #[error("failed to parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    /// The catalog CSV is missing required columns.
    #[error("catalog is missing the required `id`, `name`, `price` or `currency` headers")]
    MissingRequiredHeaders,
    /// A row carried a non-numeric or out-of-range product id.
    #[error("row {row} has an invalid product id `{value}`")]
    InvalidId { row: usize, value: String },
    /// A row did not include a product name.
    #[error("row {row} is missing a product name")]
    MissingName { row: usize },
    /// A row carried a price that is negative or not a decimal amount.
    #[error("row {row} has an invalid price `{value}`")]
    InvalidPrice { row: usize, value: String },
    /// A row carried an invalid currency code.
    #[error("row {row} has an invalid currency `{value}`")]
    InvalidCurrency { row: usize, value: String },
    /// Two rows share the same product id.
    #[error("duplicate product id {id} in row {row}")]
    DuplicateId { row: usize, id: i32 },
    /// The catalog mixes more than one currency.
    #[error("catalog mixes currencies `{first}` and `{other}` (row {row})")]
    MixedCurrencies {
        row: usize,
        first: String,
        other: String,
    },
    /// The catalog did not contain any products.
    #[error("catalog contains no products")]
    Empty,
}

/// Fixed, ordered, read-only product list backing the storefront.
///
/// The catalog is built once at startup and never mutated afterwards, so
/// the handle is a cheap clone around shared product data.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Arc<Vec<Product>>,
}

impl StaticCatalog {
    /// Build a catalog from already-validated products.
    ///
    /// Rejects empty lists, duplicate ids and mixed currencies; row
    /// numbers in the errors are 1-based positions in `products`.
    pub fn new(products: Vec<Product>) -> CatalogResult<Self> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_ids = HashSet::new();
        let first_currency = products[0].currency.clone();

        for (index, product) in products.iter().enumerate() {
            let row = index + 1;
            if !seen_ids.insert(product.id) {
                return Err(CatalogError::DuplicateId {
                    row,
                    id: product.id,
                });
            }
            if product.currency != first_currency {
                return Err(CatalogError::MixedCurrencies {
                    row,
                    first: first_currency,
                    other: product.currency.clone(),
                });
            }
        }

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Load the catalog from a CSV file on disk.
    pub fn from_csv_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Parse the catalog from CSV data.
    ///
    /// Expects case-insensitive `id`, `name`, `price` and `currency`
    /// headers plus an optional `image` column. Prices are decimal
    /// amounts in major units (`100` or `99.95`) and are stored in the
    /// smallest unit. Row order in the file becomes catalog order.
    pub fn from_reader(reader: impl Read) -> CatalogResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let columns = locate_catalog_headers(&headers);

        let (Some(id_index), Some(name_index), Some(price_index), Some(currency_index)) = (
            columns.id_index,
            columns.name_index,
            columns.price_index,
            columns.currency_index,
        ) else {
            return Err(CatalogError::MissingRequiredHeaders);
        };

        let mut products = Vec::new();

        for (index, row) in csv_reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            let id_raw = record.get(id_index).unwrap_or("").trim();
            let id = id_raw
                .parse::<i32>()
                .map_err(|_| CatalogError::InvalidId {
                    row: row_number,
                    value: id_raw.to_string(),
                })?;

            let name = sanitize_inline_text(record.get(name_index).unwrap_or(""));
            if name.is_empty() {
                return Err(CatalogError::MissingName { row: row_number });
            }

            let price_raw = record.get(price_index).unwrap_or("").trim();
            let price_cents =
                parse_price_cents(price_raw).ok_or_else(|| CatalogError::InvalidPrice {
                    row: row_number,
                    value: price_raw.to_string(),
                })?;

            let currency_raw = record.get(currency_index).unwrap_or("").trim();
            let currency =
                sanitize_currency(currency_raw).ok_or_else(|| CatalogError::InvalidCurrency {
                    row: row_number,
                    value: currency_raw.to_string(),
                })?;

            let image = columns
                .image_index
                .and_then(|index| record.get(index))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string);

            let mut product = Product::new(id, name, price_cents, currency);
            if let Some(image) = image {
                product = product.with_image(image);
            }
            products.push(product);
        }

        // Product position N corresponds to file row N + 1; remap so the
        // reported row always matches the file.
        Self::new(products).map_err(|err| match err {
            CatalogError::DuplicateId { row, id } => CatalogError::DuplicateId { row: row + 1, id },
            CatalogError::MixedCurrencies { row, first, other } => CatalogError::MixedCurrencies {
                row: row + 1,
                first,
                other,
            },
            other => other,
        })
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductReader for StaticCatalog {
    fn get_product_by_id(&self, id: i32) -> Option<Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    fn list_products(&self) -> Vec<Product> {
        self.products.as_ref().clone()
    }
}

struct CatalogHeaderIndexes {
    id_index: Option<usize>,
    name_index: Option<usize>,
    price_index: Option<usize>,
    currency_index: Option<usize>,
    image_index: Option<usize>,
}

fn locate_catalog_headers(headers: &StringRecord) -> CatalogHeaderIndexes {
    CatalogHeaderIndexes {
        id_index: locate_header(headers, "id"),
        name_index: locate_header(headers, "name"),
        price_index: locate_header(headers, "price"),
        currency_index: locate_header(headers, "currency"),
        image_index: locate_header(headers, "image"),
    }
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_currency(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.len() != CURRENCY_CODE_LEN {
        return None;
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    Some(trimmed.to_ascii_uppercase())
}

/// Parse a non-negative decimal amount in major units into the smallest
/// unit. Accepts up to two fraction digits (`100`, `99.9`, `12.34`).
fn parse_price_cents(input: &str) -> Option<i64> {
    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));

    if whole.is_empty() || whole.len() > 12 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let fraction_cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        2 => fraction.parse::<i64>().ok()?,
        _ => return None,
    };

    let whole: i64 = whole.parse().ok()?;
    Some(whole * 100 + fraction_cents)
}
