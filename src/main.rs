use std::env;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use storefront::repository::{CartStore, StaticCatalog};
use storefront::routes::cart::{add_item, change_item_quantity, remove_item, show_cart};
use storefront::routes::catalog::show_products;
use storefront::routes::checkout::{place_order, show_checkout};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let catalog_path = env::var("CATALOG_PATH").unwrap_or("catalog.csv".to_string());
    let assets_dir = env::var("ASSETS_DIR").unwrap_or("./assets".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let catalog = match StaticCatalog::from_csv_path(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load product catalog from {catalog_path}: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} products from {catalog_path}", catalog.len());

    let store = CartStore::new();
    store.subscribe(|snapshot| {
        log::debug!(
            "Cart changed: {} lines, total {} cents",
            snapshot.line_count(),
            snapshot.total_cents
        );
    });

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", assets_dir.clone()))
            .service(show_products)
            .service(show_cart)
            .service(add_item)
            .service(change_item_quantity)
            .service(remove_item)
            .service(show_checkout)
            .service(place_order)
            .app_data(web::Data::new(catalog.clone()))
            .app_data(web::Data::new(store.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
