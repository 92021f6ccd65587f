//! Hospital (tenant) scope resolution.
//!
//! Each call is evaluated from scratch: principal, caller-supplied candidates and
//! the assignment store's current state. Nothing is cached between requests, so
//! an assignment change is visible on the next call.

use std::sync::Arc;

use thiserror::Error;

use crate::repos::{assignment_repo::AssignmentStore, error::RepoError};
use crate::services::identity::{
    HospitalId, Principal,
    claims::{claim_id, claim_string},
    resolve_user_id,
};

use super::role::{Role, ScopeSource};

pub const HOSPITAL_ID_CLAIM: &str = "hospitalId";

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("receptionist must be affiliated with a hospital")]
    Unresolvable,

    #[error("assignment lookup failed")]
    Lookup(#[from] RepoError),
}

#[derive(Clone)]
pub struct HospitalScopeResolver {
    assignments: Arc<dyn AssignmentStore>,
}

impl std::fmt::Debug for HospitalScopeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HospitalScopeResolver").finish_non_exhaustive()
    }
}

impl HospitalScopeResolver {
    pub fn new(assignments: Arc<dyn AssignmentStore>) -> Self {
        Self { assignments }
    }

    /// Hospital of the caller's most recent active assignment.
    ///
    /// One read, no retry. An assignment without a hospital reference counts as none.
    pub async fn fallback_hospital(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Option<HospitalId>, ScopeError> {
        let Some(user_id) = resolve_user_id(principal) else {
            return Ok(None);
        };

        let assignment = self.assignments.find_most_recent_active(user_id).await?;
        Ok(assignment.and_then(|a| a.hospital_id))
    }

    /// Resolves the hospital a request operates against.
    ///
    /// Fails only for a receptionist with nothing resolvable when
    /// `required_if_receptionist` is set.
    pub async fn resolve(
        &self,
        principal: Option<&Principal>,
        requested: Option<HospitalId>,
        required_if_receptionist: bool,
    ) -> Result<Option<HospitalId>, ScopeError> {
        let role = Role::of(principal);
        let requested = HospitalId::provided(requested);
        let token_claim = claim_id::<HospitalId>(principal, HOSPITAL_ID_CLAIM);

        for source in role.precedence() {
            let candidate = match source {
                ScopeSource::Requested => requested,
                ScopeSource::TokenClaim => token_claim,
                ScopeSource::Assignment => self.fallback_hospital(principal).await?,
            };

            if let Some(hospital_id) = candidate {
                tracing::debug!(?role, ?source, %hospital_id, "hospital scope resolved");
                return Ok(Some(hospital_id));
            }
        }

        if role.requires_scope(required_if_receptionist) {
            tracing::warn!(
                user_id = ?resolve_user_id(principal),
                subject = ?claim_string(principal, "sub"),
                "receptionist has no resolvable hospital scope"
            );
            return Err(ScopeError::Unresolvable);
        }

        tracing::debug!(?role, "no hospital scope");
        Ok(None)
    }

    /// Query parameter wins over the body when both are supplied.
    pub async fn resolve_from(
        &self,
        principal: Option<&Principal>,
        query_hospital_id: Option<HospitalId>,
        body_hospital_id: Option<HospitalId>,
        required_if_receptionist: bool,
    ) -> Result<Option<HospitalId>, ScopeError> {
        let requested =
            HospitalId::provided(query_hospital_id).or(HospitalId::provided(body_hospital_id));
        self.resolve(principal, requested, required_if_receptionist)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    use crate::repos::{
        assignment_repo::RoleAssignmentRow, error::RepoResult, memory::MemoryAssignmentStore,
    };
    use crate::services::identity::{ClaimSet, ClaimValue, UserId, authority};

    fn hospital() -> HospitalId {
        HospitalId::from_uuid(Uuid::new_v4())
    }

    fn claims_principal(
        user_id: UserId,
        token_hospital: Option<HospitalId>,
        authorities: &[&str],
    ) -> Principal {
        let mut claims = ClaimSet::new();
        claims.insert("sub".into(), ClaimValue::Text(user_id.to_string()));
        if let Some(h) = token_hospital {
            claims.insert(HOSPITAL_ID_CLAIM.into(), ClaimValue::Text(h.to_string()));
        }
        Principal::claims(claims, authorities.iter().map(|s| s.to_string()).collect())
    }

    fn resolver(store: &MemoryAssignmentStore) -> HospitalScopeResolver {
        HospitalScopeResolver::new(Arc::new(store.clone()))
    }

    struct FailingStore;

    #[async_trait]
    impl AssignmentStore for FailingStore {
        async fn find_most_recent_active(
            &self,
            _user_id: UserId,
        ) -> RepoResult<Option<RoleAssignmentRow>> {
            Err(RepoError::Db(sqlx::Error::PoolTimedOut))
        }

        async fn list_for_hospital(
            &self,
            _hospital_id: HospitalId,
            _created_after: Option<DateTime<Utc>>,
            _limit: i64,
        ) -> RepoResult<Vec<RoleAssignmentRow>> {
            Err(RepoError::Db(sqlx::Error::PoolTimedOut))
        }
    }

    /// Every present/absent combination of requested, token claim and assignment.
    fn combinations() -> Vec<(bool, bool, bool)> {
        let mut out = Vec::new();
        for requested in [false, true] {
            for claim in [false, true] {
                for assignment in [false, true] {
                    out.push((requested, claim, assignment));
                }
            }
        }
        out
    }

    async fn check_role(authorities: &[&str], expect_order: [ScopeSource; 3]) {
        for (has_requested, has_claim, has_assignment) in combinations() {
            let store = MemoryAssignmentStore::new();
            let user = UserId::from_uuid(Uuid::new_v4());
            let (requested, claim, assigned) = (hospital(), hospital(), hospital());
            if has_assignment {
                store.insert(user, Some(assigned), "ROLE_ANY", true, Utc::now());
            }
            let principal =
                claims_principal(user, has_claim.then_some(claim), authorities);

            let got = resolver(&store)
                .resolve(Some(&principal), has_requested.then_some(requested), false)
                .await
                .unwrap();

            let expected = expect_order.iter().find_map(|source| match source {
                ScopeSource::Requested => has_requested.then_some(requested),
                ScopeSource::TokenClaim => has_claim.then_some(claim),
                ScopeSource::Assignment => has_assignment.then_some(assigned),
            });
            assert_eq!(
                got, expected,
                "authorities={authorities:?} requested={has_requested} claim={has_claim} assignment={has_assignment}"
            );
        }
    }

    #[tokio::test]
    async fn admin_and_default_roles_prefer_requested_then_claim_then_assignment() {
        use ScopeSource::*;
        let order = [Requested, TokenClaim, Assignment];
        check_role(&[authority::SUPER_ADMIN], order).await;
        check_role(&[authority::HOSPITAL_ADMIN], order).await;
        check_role(&[], order).await;
        check_role(&["ROLE_DOCTOR"], order).await;
    }

    #[tokio::test]
    async fn receptionist_prefers_claim_then_requested_then_assignment() {
        use ScopeSource::*;
        check_role(&[authority::RECEPTIONIST], [TokenClaim, Requested, Assignment]).await;
    }

    #[tokio::test]
    async fn receptionist_falls_back_to_most_recent_active_assignment() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        let (h1, h2, h3) = (hospital(), hospital(), hospital());
        let now = Utc::now();
        store.insert(user, Some(h1), authority::RECEPTIONIST, true, now - Duration::days(1));
        store.insert(user, Some(h2), authority::RECEPTIONIST, true, now);
        store.insert(user, Some(h3), authority::RECEPTIONIST, false, now + Duration::hours(1));

        let principal = claims_principal(user, None, &[authority::RECEPTIONIST]);
        let got = resolver(&store)
            .resolve(Some(&principal), None, true)
            .await
            .unwrap();
        assert_eq!(got, Some(h2));
    }

    #[tokio::test]
    async fn receptionist_without_any_scope_fails_when_required() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        store.insert(user, Some(hospital()), authority::RECEPTIONIST, false, Utc::now());

        let principal = claims_principal(user, None, &[authority::RECEPTIONIST]);
        let err = resolver(&store)
            .resolve(Some(&principal), None, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ScopeError::Unresolvable));
        assert!(err.to_string().contains("affiliated with a hospital"));

        let got = resolver(&store)
            .resolve(Some(&principal), None, false)
            .await
            .unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn super_admin_requested_wins_over_token_claim() {
        let store = MemoryAssignmentStore::new();
        let (h1, h2) = (hospital(), hospital());
        let principal = claims_principal(
            UserId::from_uuid(Uuid::new_v4()),
            Some(h2),
            &[authority::SUPER_ADMIN],
        );
        let got = resolver(&store)
            .resolve(Some(&principal), Some(h1), true)
            .await
            .unwrap();
        assert_eq!(got, Some(h1));
    }

    #[tokio::test]
    async fn token_claim_short_circuits_assignment_lookup() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        let h3 = hospital();
        store.insert(user, Some(hospital()), "ROLE_DOCTOR", true, Utc::now());

        let principal = claims_principal(user, Some(h3), &[]);
        let got = resolver(&store)
            .resolve(Some(&principal), None, false)
            .await
            .unwrap();
        assert_eq!(got, Some(h3));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn nil_requested_id_is_treated_as_absent() {
        let store = MemoryAssignmentStore::new();
        let claim = hospital();
        let principal = claims_principal(
            UserId::from_uuid(Uuid::new_v4()),
            Some(claim),
            &[authority::HOSPITAL_ADMIN],
        );
        let nil = HospitalId::from_uuid(Uuid::nil());
        let got = resolver(&store)
            .resolve(Some(&principal), Some(nil), false)
            .await
            .unwrap();
        assert_eq!(got, Some(claim));
    }

    #[tokio::test]
    async fn malformed_hospital_claim_falls_through() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        let assigned = hospital();
        store.insert(user, Some(assigned), authority::RECEPTIONIST, true, Utc::now());

        let mut claims = ClaimSet::new();
        claims.insert("uid".into(), ClaimValue::Text(user.to_string()));
        claims.insert(HOSPITAL_ID_CLAIM.into(), ClaimValue::Text("north-wing".into()));
        let principal = Principal::claims(claims, vec![authority::RECEPTIONIST.into()]);

        let got = resolver(&store)
            .resolve(Some(&principal), None, true)
            .await
            .unwrap();
        assert_eq!(got, Some(assigned));
    }

    #[tokio::test]
    async fn local_principal_uses_embedded_id_for_fallback() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        let assigned = hospital();
        store.insert(user, Some(assigned), authority::HOSPITAL_ADMIN, true, Utc::now());

        let principal = Principal::local(Some(user), vec![authority::HOSPITAL_ADMIN.into()]);
        let got = resolver(&store)
            .resolve(Some(&principal), None, false)
            .await
            .unwrap();
        assert_eq!(got, Some(assigned));
    }

    #[tokio::test]
    async fn assignment_without_hospital_reference_is_absent() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        store.insert(user, None, authority::RECEPTIONIST, true, Utc::now());

        let principal = Principal::local(Some(user), vec![authority::RECEPTIONIST.into()]);
        let r = resolver(&store);
        assert_eq!(r.fallback_hospital(Some(&principal)).await.unwrap(), None);
        assert!(matches!(
            r.resolve(Some(&principal), None, true).await,
            Err(ScopeError::Unresolvable)
        ));
    }

    #[tokio::test]
    async fn no_user_id_means_no_lookup() {
        let store = MemoryAssignmentStore::new();
        let principal = Principal::local(None, vec![]);
        let r = resolver(&store);
        assert_eq!(r.fallback_hospital(Some(&principal)).await.unwrap(), None);
        assert_eq!(r.fallback_hospital(None).await.unwrap(), None);
        assert_eq!(r.resolve(None, None, true).await.unwrap(), None);
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn repeated_resolution_is_idempotent_and_sees_new_assignments() {
        let store = MemoryAssignmentStore::new();
        let user = UserId::from_uuid(Uuid::new_v4());
        let first = hospital();
        store.insert(user, Some(first), authority::RECEPTIONIST, true, Utc::now() - Duration::hours(1));

        let principal = claims_principal(user, None, &[authority::RECEPTIONIST]);
        let r = resolver(&store);
        let a = r.resolve(Some(&principal), None, true).await.unwrap();
        let b = r.resolve(Some(&principal), None, true).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Some(first));

        let moved = hospital();
        store.insert(user, Some(moved), authority::RECEPTIONIST, true, Utc::now());
        let c = r.resolve(Some(&principal), None, true).await.unwrap();
        assert_eq!(c, Some(moved));
    }

    #[tokio::test]
    async fn query_parameter_wins_over_body() {
        let store = MemoryAssignmentStore::new();
        let (query, body) = (hospital(), hospital());
        let principal = Principal::local(None, vec![authority::SUPER_ADMIN.into()]);
        let r = resolver(&store);

        assert_eq!(
            r.resolve_from(Some(&principal), Some(query), Some(body), false)
                .await
                .unwrap(),
            Some(query)
        );
        assert_eq!(
            r.resolve_from(Some(&principal), None, Some(body), false)
                .await
                .unwrap(),
            Some(body)
        );
        let nil = HospitalId::from_uuid(Uuid::nil());
        assert_eq!(
            r.resolve_from(Some(&principal), Some(nil), Some(body), false)
                .await
                .unwrap(),
            Some(body)
        );
    }

    #[tokio::test]
    async fn store_failure_is_surfaced_as_lookup_error() {
        let r = HospitalScopeResolver::new(Arc::new(FailingStore));
        let principal = Principal::local(
            Some(UserId::from_uuid(Uuid::new_v4())),
            vec![authority::RECEPTIONIST.into()],
        );
        assert!(matches!(
            r.resolve(Some(&principal), None, true).await,
            Err(ScopeError::Lookup(_))
        ));
    }
}
