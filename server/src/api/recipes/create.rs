use crate::api::ErrorResponse;
use crate::store::{NewUserRecipe, StoreError, UserRecipe};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = NewUserRecipe,
    responses(
        (status = 201, description = "Recipe saved", body = UserRecipe),
        (status = 400, description = "Title, ingredients or directions missing", body = ErrorResponse),
        (status = 500, description = "Recipe store unwritable", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(request): Json<NewUserRecipe>,
) -> impl IntoResponse {
    match state.store.create(request).await {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e @ StoreError::MissingFields) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
