use thiserror::Error;

pub mod cart;
pub mod catalog;
pub mod checkout;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to the presentation layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced entity does not exist.
    #[error("not found")]
    NotFound,
    /// The operation requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,
    /// The submitted payload failed validation.
    #[error("{0}")]
    Form(String),
}

/// Format an amount in the smallest currency unit for display.
pub(crate) fn format_cents(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}
