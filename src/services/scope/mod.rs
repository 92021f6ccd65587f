/*!
 * Hospital scope
 *
 * Responsibility:
 * - 役割 (Role) ごとの優先順位で、リクエストが対象とする hospital を決める
 * - 最後の手段として assignment store の最新 active 割り当てを参照する
 */
mod resolver;
mod role;

pub use resolver::{HospitalScopeResolver, ScopeError};
pub use role::Role;
