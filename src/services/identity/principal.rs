/*
 * Responsibility
 * - 認証済み主体 (Principal) の型
 *   - Local: このサービスが発行したセッション (user id を直接持つ)
 *   - Claims: bearer token 由来 (claim の集合のみ、id は claim から導出する)
 * - 付与された authority (role code) の集合を両方の variant で持つ
 */
use std::collections::BTreeMap;

use uuid::Uuid;

use super::ids::UserId;

/// A single claim value. Token claims arrive as text; internally minted
/// principals may carry an already-typed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimValue {
    Text(String),
    #[cfg_attr(not(test), allow(dead_code))]
    Id(Uuid),
}

pub type ClaimSet = BTreeMap<String, ClaimValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Local { user_id: Option<UserId> },
    Claims(ClaimSet),
}

/// The authenticated caller of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identity: Identity,
    pub authorities: Vec<String>,
}

impl Principal {
    /// Session minted by this service. The HTTP surface only authenticates bearer tokens.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn local(user_id: Option<UserId>, authorities: Vec<String>) -> Self {
        Self {
            identity: Identity::Local { user_id },
            authorities,
        }
    }

    pub fn claims(claims: ClaimSet, authorities: Vec<String>) -> Self {
        Self {
            identity: Identity::Claims(claims),
            authorities,
        }
    }

    /// Builds a claims principal from a decoded token payload.
    ///
    /// Scalar claims are kept as text. `roles` and `authorities` (string arrays)
    /// become the granted authority set; other arrays/objects are dropped.
    pub fn from_token_claims(payload: &serde_json::Map<String, serde_json::Value>) -> Self {
        use serde_json::Value;

        let mut claims = ClaimSet::new();
        let mut authorities = Vec::new();

        for (key, value) in payload {
            match value {
                Value::String(s) => {
                    claims.insert(key.clone(), ClaimValue::Text(s.clone()));
                }
                Value::Number(n) => {
                    claims.insert(key.clone(), ClaimValue::Text(n.to_string()));
                }
                Value::Bool(b) => {
                    claims.insert(key.clone(), ClaimValue::Text(b.to_string()));
                }
                Value::Array(items) if key == "roles" || key == "authorities" => {
                    authorities.extend(items.iter().filter_map(|v| v.as_str()).map(str::to_owned));
                }
                _ => {}
            }
        }

        Self::claims(claims, authorities)
    }
}
