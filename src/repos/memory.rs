//! In-memory `AssignmentStore` for tests.
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::assignment_repo::{AssignmentStore, RoleAssignmentRow};
use crate::repos::error::RepoResult;
use crate::services::identity::{HospitalId, UserId};

#[derive(Clone, Default)]
pub struct MemoryAssignmentStore {
    rows: Arc<Mutex<Vec<RoleAssignmentRow>>>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        user_id: UserId,
        hospital_id: Option<HospitalId>,
        role_code: &str,
        active: bool,
        created_at: DateTime<Utc>,
    ) {
        self.rows.lock().unwrap().push(RoleAssignmentRow {
            id: Uuid::new_v4(),
            user_id,
            hospital_id,
            role_code: role_code.to_string(),
            active,
            created_at,
        });
    }

    /// Number of `find_most_recent_active` calls served.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssignmentStore for MemoryAssignmentStore {
    async fn find_most_recent_active(
        &self,
        user_id: UserId,
    ) -> RepoResult<Option<RoleAssignmentRow>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.active && r.user_id == user_id)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn list_for_hospital(
        &self,
        hospital_id: HospitalId,
        created_after: Option<DateTime<Utc>>,
        limit: i64,
    ) -> RepoResult<Vec<RoleAssignmentRow>> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<_> = rows
            .iter()
            .filter(|r| r.active && r.hospital_id == Some(hospital_id))
            .filter(|r| created_after.is_none_or(|after| r.created_at > after))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }
}
