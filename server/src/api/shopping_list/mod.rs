pub mod create;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use pantry_core::{build_shopping_list, resolve_plan, MealPlan, RecipeRecord};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /api/shopping-list endpoints (mounted at /api/shopping-list)
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create::create_shopping_list))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShoppingListItem {
    pub ingredient: String,
    /// Days the ingredient is needed, in week order
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlannedDay {
    pub day: String,
    /// Recipe name as entered
    pub requested: String,
    /// Title of the dataset recipe it resolved to, if any
    pub recipe_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShoppingListResponse {
    /// Alphabetical by ingredient
    pub items: Vec<ShoppingListItem>,
    pub days: Vec<PlannedDay>,
}

impl ShoppingListResponse {
    pub fn build(plan: &MealPlan, recipes: &[RecipeRecord]) -> Self {
        let list = build_shopping_list(plan, recipes);

        let items = list
            .iter()
            .map(|(ingredient, days)| ShoppingListItem {
                ingredient: ingredient.to_string(),
                days: days.iter().map(|d| d.to_string()).collect(),
            })
            .collect();

        let days = resolve_plan(plan, recipes)
            .into_iter()
            .map(|resolution| PlannedDay {
                day: resolution.day.to_string(),
                requested: resolution.requested,
                recipe_title: resolution.recipe.map(|r| r.title.clone()),
            })
            .collect();

        Self { items, days }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(create::create_shopping_list),
    components(schemas(
        create::ShoppingListRequest,
        ShoppingListResponse,
        ShoppingListItem,
        PlannedDay,
    ))
)]
pub struct ApiDoc;
