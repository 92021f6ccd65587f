/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /me/scope, /role-assignments は Bearer 必須 (access middleware を route 群にまとめて適用)
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    assignments::list_assignments,
    scope::{get_scope, post_scope},
};

/// Authenticated v1 routes. `/health` is mounted outside by `app`.
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me/scope", get(get_scope).post(post_scope))
        .route("/role-assignments", get(list_assignments));

    access::apply(protected, state)
}
