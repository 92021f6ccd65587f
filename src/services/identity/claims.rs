//! Claim lookup on bearer-token principals.
//!
//! Local principals carry no claims, so every lookup on them is `None`.
//! A claim that is present but cannot be parsed is reported as `None` as well;
//! callers move on to their next source instead of failing.

use std::str::FromStr;

use uuid::Uuid;

use super::principal::{ClaimValue, Identity, Principal};

fn claim_value<'a>(principal: Option<&'a Principal>, key: &str) -> Option<&'a ClaimValue> {
    match &principal?.identity {
        Identity::Claims(claims) => claims.get(key),
        Identity::Local { .. } => None,
    }
}

/// Returns the claim as a string, or `None` when absent (or not a claims principal).
pub fn claim_string(principal: Option<&Principal>, key: &str) -> Option<String> {
    match claim_value(principal, key)? {
        ClaimValue::Text(s) => Some(s.clone()),
        ClaimValue::Id(id) => Some(id.to_string()),
    }
}

/// Returns the claim parsed as an identifier.
///
/// Accepts either an identifier-typed claim or a non-blank text claim that parses.
pub fn claim_id<T>(principal: Option<&Principal>, key: &str) -> Option<T>
where
    T: FromStr + From<Uuid>,
{
    match claim_value(principal, key)? {
        ClaimValue::Id(id) => Some(T::from(*id)),
        ClaimValue::Text(s) if s.trim().is_empty() => None,
        ClaimValue::Text(s) => match s.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::debug!(claim = key, "claim is not a valid identifier; ignoring");
                None
            }
        },
    }
}
