include!("../../lib.rs");

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use lambda_http::{run, Error};
use tracing::log::info;
use crate::catalog::controller::{create_book, delete_book, list_books, method_not_allowed, not_found, update_book_rating, AppState};
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::cors_headers;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let (config, store) = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096"); // 200MB
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        let store = match std::env::var("BOOKSHELF_STORE").as_deref() {
            Ok("local-dynamodb") => RepositoryStore::LocalDynamoDB,
            _ => RepositoryStore::Memory,
        };
        (Configuration::new("dev"), store)
    } else {
        (Configuration::new("prod"), RepositoryStore::DynamoDB)
    };
    info!("starting bookshelf catalog with {:?} store", store);

    let catalog_service = create_catalog_service(&config, store).await;
    let state = AppState::new(catalog_service);

    let app = Router::new()
        .route("/books/",
               get(list_books).post(create_book).fallback(method_not_allowed))
        .route("/books/:id",
               delete(delete_book).patch(update_book_rating).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(middleware::from_fn(cors_headers))
        .with_state(state);

    run(app).await
}
