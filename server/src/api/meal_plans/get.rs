use super::{not_found, MealPlanResponse};
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/meal-plans/{id}",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Meal plan state", body = MealPlanResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn get_meal_plan(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.planners.get(&id) {
        Some(session) => Json(MealPlanResponse::new(id, &session)).into_response(),
        None => not_found(),
    }
}
