use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::StaticCatalog;
use crate::services::catalog as catalog_service;

#[get("/products")]
/// Return the product overview shown on the home screen.
pub async fn show_products(catalog: web::Data<StaticCatalog>) -> impl Responder {
    HttpResponse::Ok().json(catalog_service::load_home_page(catalog.get_ref()))
}
