/*
 * Responsibility
 * - handler 向けの extractor (認証済み Principal など)
 */
pub mod principal;

pub use principal::RequireAuth;
