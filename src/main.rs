use std::sync::{Arc, Mutex};

use axum::{response::Html, routing::get, Router};
use diesel_migrations::MigrationHarness;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pizza_catalog::handlers::{
    pizza_router, restaurant_pizza_router, restaurant_router, ApiDoc, AppState,
};
use pizza_catalog::{establish_connection, MIGRATIONS};

async fn index() -> Html<&'static str> {
    Html("<h1>Pizza Catalog API</h1>")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut conn = establish_connection();
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };

    let app = Router::new()
        .route("/", get(index))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:5555").await?;
    info!("Pizza catalog listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
