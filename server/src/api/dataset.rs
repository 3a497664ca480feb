use crate::api::DatasetRecipe;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkippedRowInfo {
    /// 0-based position among the table's data rows
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DatasetInfoResponse {
    /// Path or URL the dataset was loaded from
    pub source: String,
    pub recipe_count: usize,
    pub skipped_rows: Vec<SkippedRowInfo>,
    pub first_recipe: Option<DatasetRecipe>,
}

/// Describe the loaded dataset
///
/// Useful for checking that a dataset was picked up and parsed as expected.
#[utoipa::path(
    get,
    path = "/api/dataset",
    tag = "dataset",
    responses(
        (status = 200, description = "Summary of the loaded dataset", body = DatasetInfoResponse)
    )
)]
pub async fn dataset_info(State(state): State<AppState>) -> Json<DatasetInfoResponse> {
    let catalog = &state.catalog;

    Json(DatasetInfoResponse {
        source: catalog.source().to_string(),
        recipe_count: catalog.len(),
        skipped_rows: catalog
            .skipped()
            .iter()
            .map(|row| SkippedRowInfo {
                index: row.index,
                reason: row.reason.to_string(),
            })
            .collect(),
        first_recipe: catalog.recipes().first().map(DatasetRecipe::from),
    })
}

/// Returns the router for /api/dataset (mounted at /api/dataset)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dataset_info))
}

#[derive(OpenApi)]
#[openapi(
    paths(dataset_info),
    components(schemas(DatasetInfoResponse, SkippedRowInfo))
)]
pub struct ApiDoc;
