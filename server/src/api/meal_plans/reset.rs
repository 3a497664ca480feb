use super::{not_found, MealPlanResponse};
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// Clear every day and start again from Monday
#[utoipa::path(
    post,
    path = "/api/meal-plans/{id}/reset",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    responses(
        (status = 200, description = "Empty meal plan", body = MealPlanResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse)
    )
)]
pub async fn reset_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(mut session) = state.planners.get_mut(&id) else {
        return not_found();
    };
    session.reset();
    Json(MealPlanResponse::new(id, &session)).into_response()
}
