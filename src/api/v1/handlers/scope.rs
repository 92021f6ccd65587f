/*
 * Responsibility
 * - GET/POST /me/scope: 呼び出し元の user id / role / 解決済み hospital を返す
 * - GET は scope 必須にしない (確認用)、POST は受付 (receptionist) に必須とする
 */
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::{
    api::v1::{
        dto::scope::{ScopeQuery, ScopeRequest, ScopeResponse, parse_hospital_id},
        extractors::RequireAuth,
    },
    error::AppError,
    services::{identity::resolve_user_id, scope::Role},
    state::AppState,
};

pub async fn get_scope(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    query: Result<Query<ScopeQuery>, QueryRejection>,
) -> Result<Json<ScopeResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request("INVALID_QUERY", e.body_text()))?;
    let requested = parse_hospital_id(query.hospital_id.as_deref())?;

    let hospital_id = state.scope.resolve(Some(&principal), requested, false).await?;

    Ok(Json(ScopeResponse {
        user_id: resolve_user_id(Some(&principal)),
        role: Role::of(Some(&principal)),
        hospital_id,
    }))
}

pub async fn post_scope(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    query: Result<Query<ScopeQuery>, QueryRejection>,
    body: Result<Option<Json<ScopeRequest>>, JsonRejection>,
) -> Result<Json<ScopeResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request("INVALID_QUERY", e.body_text()))?;
    // No content-type -> no body candidate; the query alone may carry the hospital.
    let body = body
        .map_err(|e| AppError::bad_request("INVALID_BODY", e.body_text()))?
        .map(|Json(body)| body)
        .unwrap_or_default();

    let from_query = parse_hospital_id(query.hospital_id.as_deref())?;
    let from_body = parse_hospital_id(body.hospital_id.as_deref())?;

    let hospital_id = state
        .scope
        .resolve_from(Some(&principal), from_query, from_body, true)
        .await?;

    Ok(Json(ScopeResponse {
        user_id: resolve_user_id(Some(&principal)),
        role: Role::of(Some(&principal)),
        hospital_id,
    }))
}
