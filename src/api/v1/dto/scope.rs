/*
 * Responsibility
 * - hospital scope の request/response DTO
 * - hospitalId は文字列で受け、parse は parse_hospital_id に集約する
 */
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::identity::{HospitalId, UserId};
use crate::services::scope::Role;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuery {
    pub hospital_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeRequest {
    pub hospital_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeResponse {
    pub user_id: Option<UserId>,
    pub role: Role,
    pub hospital_id: Option<HospitalId>,
}

/// Blank -> not provided. Anything else must be a valid id.
pub fn parse_hospital_id(raw: Option<&str>) -> Result<Option<HospitalId>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<HospitalId>()
            .map(Some)
            .map_err(|_| AppError::bad_request("INVALID_HOSPITAL_ID", "hospitalId must be a UUID")),
    }
}
