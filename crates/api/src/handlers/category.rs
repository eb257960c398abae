//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_db::models::category::{Category, CreateCategory};
use lectern_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::ensure_category_exists;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(categories)))
}

/// POST /api/v1/categories
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.name = input.name.trim().to_string();
    input.slug = input.slug.trim().to_lowercase();
    if input.name.is_empty() || input.slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name and slug are required".into(),
        )));
    }
    ensure_category_exists(&state, input.parent_id).await?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}
