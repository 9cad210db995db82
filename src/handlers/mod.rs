pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use std::sync::{Arc, Mutex};

use diesel::SqliteConnection;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<SqliteConnection>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            restaurant::RestaurantResponse,
            restaurant::RestaurantDetailResponse,
            restaurant::RestaurantPizzaResponse,
            pizza::PizzaResponse,
            restaurant_pizza::CreateRestaurantPizzaRequest,
            restaurant_pizza::CreateRestaurantPizzaResponse,
            restaurant_pizza::PizzaRef,
            restaurant_pizza::RestaurantRef,
            crate::error::ApiErrorResponse,
            crate::error::ApiErrorsResponse,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant catalog endpoints"),
        (name = "pizzas", description = "Pizza catalog endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant-pizza offering endpoints")
    ),
    info(
        title = "Pizza Catalog API",
        description = "Restaurants, pizzas, and priced restaurant-pizza offerings",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
