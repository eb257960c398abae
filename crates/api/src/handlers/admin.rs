//! Admin-only user management.

use axum::extract::{Path, State};
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::user::UserResponse;
use lectern_db::repositories::{SessionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/users/{id}/deactivate
///
/// Soft-disable an account and revoke its refresh sessions. Users are never
/// hard-deleted. Deactivating an already inactive user is a no-op.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot deactivate their own account".into(),
        )));
    }

    if UserRepo::deactivate(&state.pool, id).await? {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = id, admin_id = admin.user_id, revoked, "User deactivated");
    }

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(user.into())))
}
