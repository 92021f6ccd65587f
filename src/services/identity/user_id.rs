/*
 * Responsibility
 * - Principal から安定した UserId を取り出す
 * - Claims principal は claim key を固定順で試す (発行元によって入る key が違う)
 * - 失敗は常に None (エラーにしない)
 */
use super::claims::claim_id;
use super::ids::UserId;
use super::principal::{Identity, Principal};

/// Claim keys tried in order. Some issuers only populate one of these.
pub const USER_ID_CLAIM_KEYS: [&str; 4] = ["uid", "userId", "id", "sub"];

pub fn resolve_user_id(principal: Option<&Principal>) -> Option<UserId> {
    let principal = principal?;
    match &principal.identity {
        Identity::Local { user_id } => *user_id,
        Identity::Claims(_) => USER_ID_CLAIM_KEYS
            .iter()
            .find_map(|key| claim_id::<UserId>(Some(principal), key)),
    }
}
