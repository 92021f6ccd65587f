/*
 * Responsibility
 * - role assignment 一覧の request/response DTO
 * - row → response の変換 (内部の active フラグは返さない: 一覧は active のみ)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::assignment_repo::RoleAssignmentRow;
use crate::services::identity::{HospitalId, UserId};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListQuery {
    pub hospital_id: Option<String>,
    pub limit: Option<i64>,
    pub created_after: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentResponse {
    pub id: Uuid,
    pub user_id: UserId,
    pub hospital_id: Option<HospitalId>,
    pub role_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<RoleAssignmentRow> for RoleAssignmentResponse {
    fn from(row: RoleAssignmentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            hospital_id: row.hospital_id,
            role_code: row.role_code,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentListResponse {
    pub hospital_id: HospitalId,
    pub items: Vec<RoleAssignmentResponse>,
}
