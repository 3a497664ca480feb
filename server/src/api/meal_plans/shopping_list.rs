use super::not_found;
use crate::api::shopping_list::ShoppingListResponse;
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// Shopping list for the days planned so far
#[utoipa::path(
    get,
    path = "/api/meal-plans/{id}/shopping-list",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Aggregated shopping list", body = ShoppingListResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(session) = state.planners.get(&id) else {
        return not_found();
    };
    Json(ShoppingListResponse::build(
        session.plan(),
        state.catalog.recipes(),
    ))
    .into_response()
}
