use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorResponse};
use crate::store;

use super::{pizza::PizzaResponse, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantResponse {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
}

impl From<crate::models::Restaurant> for RestaurantResponse {
    fn from(restaurant: crate::models::Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetailResponse {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
    /// Offerings on this restaurant's menu
    pub restaurant_pizzas: Vec<RestaurantPizzaResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaResponse {
    /// Unique identifier for the offering
    pub id: i32,
    /// The pizza being offered
    pub pizza: PizzaResponse,
    /// Identifier of the offered pizza
    pub pizza_id: i32,
    /// Price of the offering
    pub price: i32,
    /// Identifier of the offering restaurant
    pub restaurant_id: i32,
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List all restaurants", body = Vec<RestaurantResponse>),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let mut conn = state.db.lock().expect("catalog connection mutex poisoned");

    let restaurants = store::list_restaurants(&mut conn)?;

    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its offerings", body = RestaurantDetailResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID"),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetailResponse>, ApiError> {
    let mut conn = state.db.lock().expect("catalog connection mutex poisoned");

    let (restaurant, offerings) = store::get_restaurant(&mut conn, id)?;

    Ok(Json(RestaurantDetailResponse {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas: offerings
            .into_iter()
            .map(|(offering, pizza)| RestaurantPizzaResponse {
                id: offering.id,
                pizza: pizza.into(),
                pizza_id: offering.pizza_id,
                price: offering.price,
                restaurant_id: offering.restaurant_id,
            })
            .collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its offerings deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID"),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.db.lock().expect("catalog connection mutex poisoned");

    store::delete_restaurant(&mut conn, id)?;

    Ok(StatusCode::NO_CONTENT)
}
