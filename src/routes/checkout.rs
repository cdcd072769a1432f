use actix_web::{HttpResponse, Responder, get, post, web};

use crate::repository::CartStore;
use crate::services::{ServiceError, checkout as checkout_service};

#[get("/checkout")]
/// Return the order summary shown on the checkout screen.
pub async fn show_checkout(store: web::Data<CartStore>) -> impl Responder {
    HttpResponse::Ok().json(checkout_service::load_checkout_page(store.get_ref()))
}

#[post("/checkout")]
/// Confirm the order: the cart is cleared and the confirmation returned.
pub async fn place_order(store: web::Data<CartStore>) -> impl Responder {
    match checkout_service::place_order(store.get_ref()) {
        Ok(confirmation) => HttpResponse::Ok().json(confirmation),
        Err(ServiceError::EmptyCart) => HttpResponse::BadRequest().body("cart is empty"),
        Err(err) => {
            log::error!("Failed to place order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
