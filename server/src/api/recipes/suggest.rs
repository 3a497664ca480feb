use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestParams {
    /// Partial recipe title (at least 2 characters)
    #[serde(default)]
    pub q: String,
    /// Maximum number of titles (default: 10, max: 50)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuggestResponse {
    pub titles: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/suggest",
    tag = "recipes",
    params(SuggestParams),
    responses(
        (status = 200, description = "Recipe titles containing the query", body = SuggestResponse)
    )
)]
pub async fn suggest_titles(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let titles = state
        .catalog
        .suggest_titles(&params.q, limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(SuggestResponse { titles })
}
