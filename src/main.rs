use axum::{
    http::StatusCode,
    response::Redirect,
    routing::get,
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower_http::cors::{Any, CorsLayer};

mod database;
mod errors;
mod models;
mod routes;
mod ui;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let pool = database::create_database_connection()
        .await
        .expect("failed to connect to PostgreSQL");

    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    async fn handle_404() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    let app = Router::new()
        // read-only list endpoints
        .route("/api/category", get(routes::category::list_categories))
        .route("/api/product", get(routes::product::list_products))
        .route("/api/stock", get(routes::stock::list_stocks))
        // server-rendered admin pages
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/categories", get(ui::category::category_page))
        .route("/products", get(ui::product::product_page))
        .route("/stocks", get(ui::stock::stock_page))
        .fallback(handle_404)
        .with_state(pool)
        .layer(cors);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    log::info!("server running at http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    axum::serve(listener, app).await.expect("server error");
}
