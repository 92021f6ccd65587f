/*
 * Responsibility
 * - GET /role-assignments: 解決済み hospital の active な割り当て一覧
 * - limit / createdAfter は sanitize で正規化してから repo に渡す
 * - 一覧は tenant が決まらないと意味がないので、どの role でも未解決なら 403
 */
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    api::v1::{
        dto::{
            assignments::{AssignmentListQuery, RoleAssignmentListResponse},
            scope::parse_hospital_id,
        },
        extractors::RequireAuth,
    },
    error::AppError,
    services::sanitize::{parse_date_time, sanitize_limit},
    state::AppState,
};

pub async fn list_assignments(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    query: Result<Query<AssignmentListQuery>, QueryRejection>,
) -> Result<Json<RoleAssignmentListResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request("INVALID_QUERY", e.body_text()))?;

    let requested = parse_hospital_id(query.hospital_id.as_deref())?;
    let limit = sanitize_limit(query.limit, state.page_limits.default, state.page_limits.max);
    // Stored timestamps are UTC. Offset inputs arrive already in UTC; zone-less ones are read as UTC.
    let created_after = parse_date_time("createdAfter", query.created_after.as_deref())?
        .map(|t| t.and_utc());

    let hospital_id = state
        .scope
        .resolve(Some(&principal), requested, true)
        .await?
        .ok_or_else(|| {
            AppError::forbidden(
                "HOSPITAL_SCOPE_REQUIRED",
                "a hospital must be selected to list role assignments",
            )
        })?;

    let rows = state
        .assignments
        .list_for_hospital(hospital_id, created_after, limit)
        .await?;

    Ok(Json(RoleAssignmentListResponse {
        hospital_id,
        items: rows.into_iter().map(Into::into).collect(),
    }))
}
