/*
 * Responsibility
 * - user_role_hospital_assignments 向けの読み取り専用アクセス
 * - AssignmentStore trait を境界にして、resolver からは実装を隠す
 * - active = true のみ / created_at DESC 順 (最新が先頭)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::services::identity::{HospitalId, UserId};

/// A historical link between a user, a hospital and a role.
///
/// `hospital_id` is nullable in the schema (hospital deleted / never set).
#[derive(Debug, Clone, FromRow)]
pub struct RoleAssignmentRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub hospital_id: Option<HospitalId>,
    pub role_code: String,
    #[allow(dead_code)]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Read side of the assignment store.
///
/// Implementations must be side-effect free and must not retry internally.
#[async_trait]
pub trait AssignmentStore: Send + Sync + 'static {
    /// Most recent active assignment for `user_id` (by `created_at` DESC), if any.
    async fn find_most_recent_active(
        &self,
        user_id: UserId,
    ) -> RepoResult<Option<RoleAssignmentRow>>;

    /// Active assignments of a hospital, newest first.
    async fn list_for_hospital(
        &self,
        hospital_id: HospitalId,
        created_after: Option<DateTime<Utc>>,
        limit: i64,
    ) -> RepoResult<Vec<RoleAssignmentRow>>;
}

#[derive(Clone, Debug)]
pub struct PgAssignmentStore {
    pool: PgPool,
}

impl PgAssignmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for PgAssignmentStore {
    async fn find_most_recent_active(
        &self,
        user_id: UserId,
    ) -> RepoResult<Option<RoleAssignmentRow>> {
        let row = sqlx::query_as::<_, RoleAssignmentRow>(
            r#"
            SELECT
                id, user_id, hospital_id, role_code, active, created_at
            FROM user_role_hospital_assignments
            WHERE user_id = $1 AND active = true
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(row)
    }

    async fn list_for_hospital(
        &self,
        hospital_id: HospitalId,
        created_after: Option<DateTime<Utc>>,
        limit: i64,
    ) -> RepoResult<Vec<RoleAssignmentRow>> {
        // created_after: None -> no lower bound
        let rows = sqlx::query_as::<_, RoleAssignmentRow>(
            r#"
            SELECT
                id, user_id, hospital_id, role_code, active, created_at
            FROM user_role_hospital_assignments
            WHERE hospital_id = $1
                AND active = true
                AND ($2::timestamptz IS NULL OR created_at > $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(hospital_id)
        .bind(created_after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(rows)
    }
}
