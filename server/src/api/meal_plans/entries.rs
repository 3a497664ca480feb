use super::{not_found, plan_error, MealEntryRequest, MealPlanResponse};
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// Plan the current day and advance to the next one
#[utoipa::path(
    post,
    path = "/api/meal-plans/{id}/entries",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID")
    ),
    request_body = MealEntryRequest,
    responses(
        (status = 200, description = "Updated meal plan", body = MealPlanResponse),
        (status = 400, description = "Empty recipe name", body = ErrorResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse),
        (status = 409, description = "Every day is already planned", body = ErrorResponse)
    )
)]
pub async fn submit_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MealEntryRequest>,
) -> impl IntoResponse {
    let Some(mut session) = state.planners.get_mut(&id) else {
        return not_found();
    };

    match session.submit(&request.recipe) {
        Ok(day) => {
            tracing::debug!(%id, %day, recipe = %request.recipe, "Planned meal");
            Json(MealPlanResponse::new(id, &session)).into_response()
        }
        Err(e) => plan_error(e),
    }
}
