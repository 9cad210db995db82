use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorsResponse};
use crate::store;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price of the offering, between 1 and 30
    pub price: Option<i32>,
    /// Identifier of the pizza to offer
    pub pizza_id: Option<i32>,
    /// Identifier of the restaurant offering the pizza
    pub restaurant_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaResponse {
    /// Unique identifier for the offering
    pub id: i32,
    /// Price of the offering
    pub price: i32,
    /// Identifier of the offered pizza
    pub pizza_id: i32,
    /// Identifier of the offering restaurant
    pub restaurant_id: i32,
    /// The offered pizza
    pub pizza: PizzaRef,
    /// The offering restaurant
    pub restaurant: RestaurantRef,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaRef {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantRef {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Offering created", body = CreateRestaurantPizzaResponse),
        (status = 404, description = "Pizza or restaurant not found", body = ApiErrorsResponse),
        (status = 400, description = "Price missing or out of range", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantPizzaRequest>,
) -> Result<(StatusCode, Json<CreateRestaurantPizzaResponse>), ApiError> {
    let mut conn = state.db.lock().expect("catalog connection mutex poisoned");

    let (offering, pizza, restaurant) = store::create_restaurant_pizza(
        &mut conn,
        payload.price,
        payload.pizza_id,
        payload.restaurant_id,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRestaurantPizzaResponse {
            id: offering.id,
            price: offering.price,
            pizza_id: offering.pizza_id,
            restaurant_id: offering.restaurant_id,
            pizza: PizzaRef {
                id: pizza.id,
                name: pizza.name,
            },
            restaurant: RestaurantRef {
                id: restaurant.id,
                name: restaurant.name,
            },
        }),
    ))
}
