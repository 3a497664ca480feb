pub mod create;
pub mod get;
pub mod list;
pub mod random;
pub mod rate;
pub mod search;
pub mod suggest;

use crate::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/search", post(search::search_recipes))
        .route("/random", get(random::recipe_of_the_day))
        .route("/suggest", get(suggest::suggest_titles))
        .route("/{id}", get(get::get_recipe))
        .route("/{id}/rate", put(rate::rate_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        rate::rate_recipe,
        search::search_recipes,
        random::recipe_of_the_day,
        suggest::suggest_titles,
    ),
    components(schemas(
        crate::store::UserRecipe,
        crate::store::NewUserRecipe,
        list::RecipeListResponse,
        rate::RateRecipeRequest,
        search::SearchRequest,
        search::SearchResponse,
        search::SearchResult,
        search::Pagination,
        suggest::SuggestResponse,
    ))
)]
pub struct ApiDoc;
