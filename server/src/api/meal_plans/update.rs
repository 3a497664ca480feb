use super::{not_found, plan_error, MealEntryRequest, MealPlanResponse};
use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use pantry_core::Weekday;
use uuid::Uuid;

/// Replace one day's recipe in a completed plan
#[utoipa::path(
    put,
    path = "/api/meal-plans/{id}/days/{day}",
    tag = "meal_plans",
    params(
        ("id" = Uuid, Path, description = "Meal plan ID"),
        ("day" = String, Path, description = "Day of the week, e.g. \"Wednesday\"")
    ),
    request_body = MealEntryRequest,
    responses(
        (status = 200, description = "Updated meal plan", body = MealPlanResponse),
        (status = 400, description = "Unknown day or empty recipe name", body = ErrorResponse),
        (status = 404, description = "Meal plan not found", body = ErrorResponse),
        (status = 409, description = "Plan is not complete yet", body = ErrorResponse)
    )
)]
pub async fn update_day(
    State(state): State<AppState>,
    Path((id, day)): Path<(Uuid, String)>,
    Json(request): Json<MealEntryRequest>,
) -> impl IntoResponse {
    let day: Weekday = match day.parse() {
        Ok(day) => day,
        Err(e) => return plan_error(e),
    };
    let Some(mut session) = state.planners.get_mut(&id) else {
        return not_found();
    };

    match session.change_day(day, &request.recipe) {
        Ok(()) => Json(MealPlanResponse::new(id, &session)).into_response(),
        Err(e) => plan_error(e),
    }
}
