/*!
 * Principal extractor
 *
 * Responsibility:
 * - access middleware が extensions に入れた Principal を handler に渡す
 * - 見つからない = 認証されていない (401)
 *
 * Public API:
 * - RequireAuth
 */

mod core;

pub use core::RequireAuth;
