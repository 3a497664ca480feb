use crate::api::{DatasetRecipe, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Local;

#[utoipa::path(
    get,
    path = "/api/recipes/random",
    tag = "recipes",
    responses(
        (status = 200, description = "Today's featured recipe", body = DatasetRecipe),
        (status = 404, description = "Dataset has no recipes", body = ErrorResponse)
    )
)]
pub async fn recipe_of_the_day(State(state): State<AppState>) -> impl IntoResponse {
    let today = Local::now().date_naive();

    match state.catalog.recipe_of_the_day(today) {
        Some(recipe) => Json(DatasetRecipe::from(recipe)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No recipes found in the dataset".to_string(),
            }),
        )
            .into_response(),
    }
}
