//! # Record Handlers
//!
//! handler های generic که برای هر entity در router نمونه‌سازی میشن:
//!
//! ```rust,ignore
//! .route("/", post(records::create::<Course>))
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::{
    api::extractors::{RecordJson, RequestId},
    error::Result,
    models::{ApiResponse, Deleted, Entity, Updated},
    services::AppState,
};

// =====================================
// Create
// =====================================
/// ساخت رکورد جدید
///
/// # Endpoint
/// `POST /api/{collection}`
///
/// # Response
/// `201 Created` با رکورد کامل:
/// ```json
/// {
///   "success": true,
///   "data": { "cid": "12342", "cname": "میو", "department": "علوم پایه", "credit": "3" }
/// }
/// ```
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    RecordJson(record): RecordJson<E>,
) -> Result<impl IntoResponse> {
    debug!(%request_id, collection = %E::SCHEMA.collection, "Create request");

    let record = state.records::<E>().create(record).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

// =====================================
// Get
// =====================================
/// گرفتن رکورد با کلید طبیعی
///
/// # Endpoint
/// `GET /api/{collection}/:key`
pub async fn get<E: Entity>(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<E>>> {
    let record = state.records::<E>().get(&key).await?;

    Ok(Json(ApiResponse::success(record)))
}

// =====================================
// Update
// =====================================
/// به‌روزرسانی جزئی
///
/// # Endpoint
/// `PATCH /api/{collection}/:key`
///
/// # Response
/// ```json
/// {
///   "success": true,
///   "data": { "key": "12342", "updated_fields": { "credit": "2" } }
/// }
/// ```
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Path(key): Path<String>,
    RecordJson(patch): RecordJson<E::Patch>,
) -> Result<Json<ApiResponse<Updated>>> {
    debug!(%request_id, collection = %E::SCHEMA.collection, %key, "Update request");

    let updated = state.records::<E>().update(&key, patch).await?;

    Ok(Json(ApiResponse::success(updated)))
}

// =====================================
// Delete
// =====================================
/// حذف با کلید طبیعی
///
/// # Endpoint
/// `DELETE /api/{collection}/:key`
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>> {
    let deleted = state.records::<E>().delete(&key).await?;

    Ok(Json(ApiResponse::success(deleted)))
}
