pub mod dataset;
pub mod meal_plans;
pub mod recipes;
pub mod shopping_list;
pub mod testing;

use pantry_core::RecipeRecord;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A recipe from the loaded dataset
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DatasetRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub site: Option<String>,
    /// Normalized ingredient names used for matching
    pub tags: Vec<String>,
}

impl From<&RecipeRecord> for DatasetRecipe {
    fn from(recipe: &RecipeRecord) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            directions: recipe.directions.clone(),
            link: recipe.link.clone(),
            source: recipe.source.clone(),
            site: recipe.site.clone(),
            tags: recipe.tags.clone(),
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, DatasetRecipe)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        testing::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        dataset::ApiDoc::openapi(),
        meal_plans::ApiDoc::openapi(),
        shopping_list::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
