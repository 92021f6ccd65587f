/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - assignments: AssignmentStore, scope: HospitalScopeResolver, auth: AuthService など
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 解決済み scope はここに持たない (リクエストごとに再計算)
 */
use std::sync::Arc;

use crate::config::PageLimits;
use crate::repos::assignment_repo::AssignmentStore;
use crate::services::{auth::AuthService, scope::HospitalScopeResolver};

#[derive(Clone)]
pub struct AppState {
    pub assignments: Arc<dyn AssignmentStore>,
    pub scope: HospitalScopeResolver,
    pub auth: Arc<AuthService>,
    pub page_limits: PageLimits,
}

impl AppState {
    pub fn new(
        assignments: Arc<dyn AssignmentStore>,
        auth: Arc<AuthService>,
        page_limits: PageLimits,
    ) -> Self {
        let scope = HospitalScopeResolver::new(assignments.clone());
        Self {
            assignments,
            scope,
            auth,
            page_limits,
        }
    }
}
