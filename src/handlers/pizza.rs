use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::store;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaResponse {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Comma-separated ingredient list
    pub ingredients: String,
}

impl From<crate::models::Pizza> for PizzaResponse {
    fn from(pizza: crate::models::Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
        }
    }
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List all pizzas", body = Vec<PizzaResponse>),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaResponse>>, ApiError> {
    let mut conn = state.db.lock().expect("catalog connection mutex poisoned");

    let pizzas = store::list_pizzas(&mut conn)?;

    Ok(Json(pizzas.into_iter().map(Into::into).collect()))
}
