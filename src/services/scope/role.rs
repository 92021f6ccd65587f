/*
 * Responsibility
 * - 権限文字列 → Role (閉じた enum) への変換
 * - Role ごとの hospital scope の優先順位を「データ」として持つ
 */
use serde::Serialize;

use crate::services::identity::{
    Principal,
    authority::{self, has_authority},
};

/// Where a candidate hospital id comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeSource {
    /// Query parameter or request body supplied by the caller.
    Requested,
    /// `hospitalId` claim on the bearer token.
    TokenClaim,
    /// Most recent active role assignment in the store.
    Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    HospitalAdmin,
    Receptionist,
    Default,
}

impl Role {
    /// First matching authority wins, in this order. No match (or no
    /// principal at all) is `Default`.
    pub fn of(principal: Option<&Principal>) -> Self {
        if has_authority(principal, authority::SUPER_ADMIN) {
            Role::SuperAdmin
        } else if has_authority(principal, authority::HOSPITAL_ADMIN) {
            Role::HospitalAdmin
        } else if has_authority(principal, authority::RECEPTIONIST) {
            Role::Receptionist
        } else {
            Role::Default
        }
    }

    pub fn precedence(self) -> &'static [ScopeSource] {
        use ScopeSource::*;
        match self {
            Role::SuperAdmin | Role::HospitalAdmin | Role::Default => {
                &[Requested, TokenClaim, Assignment]
            }
            // Badge-issued hospital claim is not overridable by request input.
            Role::Receptionist => &[TokenClaim, Requested, Assignment],
        }
    }

    /// Whether an unresolved scope is fatal for this role at a call site.
    pub fn requires_scope(self, required_if_receptionist: bool) -> bool {
        self == Role::Receptionist && required_if_receptionist
    }
}
