use crate::api::{DatasetRecipe, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use pantry_core::{MatchPolicy, MatchResult, Page};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Ingredients the recipe must use
    pub ingredients: Vec<String>,
    /// 1-indexed page number (default: 1)
    pub page: Option<usize>,
    /// Results per page (default: 10, max: 100)
    pub page_size: Option<usize>,
    /// Also return recipes that use only some of the ingredients, ranked by
    /// how many they use
    #[serde(default)]
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResult {
    #[serde(flatten)]
    pub recipe: DatasetRecipe,
    pub match_percentage: f64,
    /// Requested ingredients this recipe does not use
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl From<MatchResult<'_>> for SearchResult {
    fn from(result: MatchResult<'_>) -> Self {
        Self {
            recipe: result.recipe.into(),
            match_percentage: result.match_percentage,
            missing: result.missing,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub recipes: Vec<SearchResult>,
    pub pagination: Pagination,
}

impl From<Page<MatchResult<'_>>> for SearchResponse {
    fn from(page: Page<MatchResult<'_>>) -> Self {
        Self {
            pagination: Pagination {
                page: page.page,
                page_size: page.page_size,
                total: page.total,
                has_more: page.has_more,
            },
            recipes: page.items.into_iter().map(SearchResult::from).collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes/search",
    tag = "recipes",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of matching recipes", body = SearchResponse),
        (status = 400, description = "No ingredients given or invalid page", body = ErrorResponse),
        (status = 404, description = "No recipe uses these ingredients", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    let policy = if request.partial {
        MatchPolicy::Partial
    } else {
        MatchPolicy::RequireAll
    };
    let page_size = state.config.page_size(request.page_size);
    let page = request.page.unwrap_or(1);

    match state
        .catalog
        .search(&request.ingredients, policy, page, page_size)
    {
        Ok(page) if page.total == 0 => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No recipes found with the specified ingredients".to_string(),
            }),
        )
            .into_response(),
        Ok(page) => Json(SearchResponse::from(page)).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
