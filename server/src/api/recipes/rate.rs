use crate::api::ErrorResponse;
use crate::store::{StoreError, UserRecipe};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RateRecipeRequest {
    /// 1 to 5
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i64,
    pub review: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}/rate",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RateRecipeRequest,
    responses(
        (status = 200, description = "Rating saved", body = UserRecipe),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn rate_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RateRecipeRequest>,
) -> impl IntoResponse {
    match state.store.rate(id, request.rating, request.review).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(e @ StoreError::InvalidRating(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to rate recipe: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
