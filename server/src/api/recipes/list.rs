use crate::api::ErrorResponse;
use crate::store::UserRecipe;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<UserRecipe>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All user-submitted recipes", body = RecipeListResponse),
        (status = 500, description = "Recipe store unreadable", body = ErrorResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(recipes) => Json(RecipeListResponse { recipes }).into_response(),
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response()
        }
    }
}
