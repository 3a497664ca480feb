use super::MealPlanResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use pantry_core::PlannerSession;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/meal-plans",
    tag = "meal_plans",
    responses(
        (status = 201, description = "Empty meal plan, starting on Monday", body = MealPlanResponse)
    )
)]
pub async fn create_meal_plan(State(state): State<AppState>) -> impl IntoResponse {
    let id = Uuid::new_v4();
    let session = PlannerSession::new();
    let response = MealPlanResponse::new(id, &session);
    state.planners.insert(id, session);

    tracing::debug!(%id, "Started meal plan");
    (StatusCode::CREATED, Json(response))
}
