/*!
 * Caller identity
 *
 * Responsibility:
 * - Principal (local session / bearer claims) の型
 * - claim lookup, user id 抽出, authority 判定
 */
pub mod authority;
pub mod claims;
pub mod ids;
pub mod principal;
pub mod user_id;

pub use ids::{HospitalId, UserId};
pub use principal::Principal;
#[cfg(test)]
pub use principal::{ClaimSet, ClaimValue, Identity};
pub use user_id::resolve_user_id;
