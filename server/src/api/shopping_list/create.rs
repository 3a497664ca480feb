use super::ShoppingListResponse;
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use pantry_core::MealPlan;
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ShoppingListRequest {
    /// Day name (e.g. "Monday") to recipe name
    pub plan: BTreeMap<String, String>,
}

/// Build a shopping list for a whole plan in one call
///
/// Stateless: nothing is stored. Day names are case-insensitive; recipe names
/// match the first dataset title that contains them.
#[utoipa::path(
    post,
    path = "/api/shopping-list",
    tag = "shopping_list",
    request_body = ShoppingListRequest,
    responses(
        (status = 200, description = "Aggregated shopping list", body = ShoppingListResponse),
        (status = 400, description = "Unknown day name", body = ErrorResponse)
    )
)]
pub async fn create_shopping_list(
    State(state): State<AppState>,
    Json(request): Json<ShoppingListRequest>,
) -> impl IntoResponse {
    let plan = match MealPlan::from_entries(request.plan) {
        Ok(plan) => plan,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    };

    Json(ShoppingListResponse::build(&plan, state.catalog.recipes())).into_response()
}
