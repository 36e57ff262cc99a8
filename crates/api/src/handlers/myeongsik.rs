//! Handlers for myeongsik (birth-data profile) records.
//!
//! Every mutation is scoped to the authenticated owner at the SQL level;
//! the listing endpoint answers an empty array for unauthenticated callers
//! instead of 401 so the client can render its anonymous state without
//! special-casing errors.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use manse_core::error::CoreError;
use manse_core::types::DbId;
use manse_db::models::myeongsik::{CreateMyeongSik, MyeongSik, UpdateMyeongSik};
use manse_db::repositories::MyeongSikRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// GET /api/v1/myeongsik
///
/// List the caller's records, newest first. Unauthenticated callers get
/// an empty array with success status.
pub async fn list(
    OptionalAuthUser(user): OptionalAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MyeongSik>>>> {
    let records = match user {
        Some(user) => MyeongSikRepo::list_for_owner(&state.pool, user.user_id).await?,
        None => Vec::new(),
    };
    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/myeongsik
///
/// Create a record owned by the caller.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMyeongSik>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let record = MyeongSikRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        record_id = record.id,
        owner_id = %user.user_id,
        "Myeongsik record created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// Request body for the body-addressed delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteMyeongSik {
    pub id: DbId,
}

/// POST /api/v1/myeongsik/delete
///
/// Soft-delete one of the caller's records, addressed by a JSON body.
/// Answers `{ "success": true }`; a record that does not exist (or is
/// owned by someone else) is a 404.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeleteMyeongSik>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = MyeongSikRepo::soft_delete(&state.pool, user.user_id, input.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MyeongSik",
            id: input.id,
        }));
    }

    tracing::info!(
        record_id = input.id,
        owner_id = %user.user_id,
        "Myeongsik record soft-deleted",
    );

    Ok(Json(SuccessResponse::ok()))
}

/// PUT /api/v1/myeongsik/{id}
///
/// Partially update one of the caller's records.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMyeongSik>,
) -> AppResult<Json<DataResponse<MyeongSik>>> {
    let record = MyeongSikRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MyeongSik",
            id,
        }))?;

    tracing::info!(record_id = id, owner_id = %user.user_id, "Myeongsik record updated");

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/myeongsik/{id}/restore
///
/// Restore one of the caller's soft-deleted records.
pub async fn restore(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let restored = MyeongSikRepo::restore(&state.pool, user.user_id, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MyeongSik",
            id,
        }));
    }

    tracing::info!(record_id = id, owner_id = %user.user_id, "Myeongsik record restored");

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/v1/myeongsik/{id}
///
/// Permanently remove one of the caller's records.
pub async fn hard_delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let removed = MyeongSikRepo::hard_delete(&state.pool, user.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MyeongSik",
            id,
        }));
    }

    tracing::info!(record_id = id, owner_id = %user.user_id, "Myeongsik record hard-deleted");

    Ok(Json(SuccessResponse::ok()))
}
