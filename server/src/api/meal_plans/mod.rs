//! Interactive weekly meal planning.
//!
//! A session is filled in one day at a time, Monday first. Once every day has
//! a recipe, individual days can be corrected. Sessions live in memory only.

pub mod create;
pub mod delete;
pub mod entries;
pub mod get;
pub mod reset;
pub mod shopping_list;
pub mod update;

use crate::api::ErrorResponse;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pantry_core::{PlanError, PlannerSession};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/meal-plans endpoints (mounted at /api/meal-plans)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_meal_plan))
        .route(
            "/{id}",
            get(get::get_meal_plan).delete(delete::delete_meal_plan),
        )
        .route("/{id}/entries", post(entries::submit_entry))
        .route("/{id}/days/{day}", put(update::update_day))
        .route("/{id}/reset", post(reset::reset_meal_plan))
        .route("/{id}/shopping-list", get(shopping_list::get_shopping_list))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlannedMeal {
    pub day: String,
    /// `None` until the day has been planned
    pub recipe: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MealPlanResponse {
    pub id: Uuid,
    /// Next day to plan; `None` once the week is complete
    pub current_day: Option<String>,
    pub complete: bool,
    /// Monday through Sunday
    pub meals: Vec<PlannedMeal>,
}

impl MealPlanResponse {
    pub fn new(id: Uuid, session: &PlannerSession) -> Self {
        Self {
            id,
            current_day: session.current_day().map(|d| d.to_string()),
            complete: session.is_complete(),
            meals: session
                .plan()
                .iter()
                .map(|(day, recipe)| PlannedMeal {
                    day: day.to_string(),
                    recipe: (!recipe.is_empty()).then(|| recipe.to_string()),
                })
                .collect(),
        }
    }
}

/// Recipe name for a day
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MealEntryRequest {
    pub recipe: String,
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Meal plan not found".to_string(),
        }),
    )
        .into_response()
}

fn plan_error(e: PlanError) -> Response {
    let status = match e {
        PlanError::PlanComplete | PlanError::PlanIncomplete => StatusCode::CONFLICT,
        PlanError::UnknownDay(_) | PlanError::EmptyRecipeName => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_meal_plan,
        get::get_meal_plan,
        delete::delete_meal_plan,
        entries::submit_entry,
        update::update_day,
        reset::reset_meal_plan,
        shopping_list::get_shopping_list,
    ),
    components(schemas(MealPlanResponse, PlannedMeal, MealEntryRequest))
)]
pub struct ApiDoc;
