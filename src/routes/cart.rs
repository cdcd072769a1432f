use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::forms::cart::{AddToCartForm, ChangeQuantityForm};
use crate::repository::{CartStore, StaticCatalog};
use crate::services::{ServiceError, cart as cart_service};

#[get("/cart")]
/// Return the current cart contents.
pub async fn show_cart(store: web::Data<CartStore>) -> impl Responder {
    HttpResponse::Ok().json(cart_service::load_cart_page(store.get_ref()))
}

#[post("/cart/items")]
/// Add one unit of a catalog product to the cart.
///
/// Unknown product ids receive a `404 Not Found` response.
pub async fn add_item(
    catalog: web::Data<StaticCatalog>,
    store: web::Data<CartStore>,
    web::Json(form): web::Json<AddToCartForm>,
) -> impl Responder {
    match cart_service::add_to_cart(catalog.get_ref(), store.get_ref(), form) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to add item to cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/cart/items/{product_id}/quantity")]
/// Replace the quantity of a cart line.
///
/// A quantity of zero is rejected; removing the line is a separate
/// request so the client can confirm the deletion with the shopper.
pub async fn change_item_quantity(
    store: web::Data<CartStore>,
    path: web::Path<i32>,
    web::Json(form): web::Json<ChangeQuantityForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match cart_service::change_quantity(store.get_ref(), product_id, form) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to change quantity for product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/cart/items/{product_id}")]
/// Remove a line from the cart. Succeeds whether or not the line existed.
pub async fn remove_item(store: web::Data<CartStore>, path: web::Path<i32>) -> impl Responder {
    let product_id = path.into_inner();

    HttpResponse::Ok().json(cart_service::remove_item(store.get_ref(), product_id))
}
