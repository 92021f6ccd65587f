/*
 * Responsibility
 * - 永続化層 (sqlx) の公開インターフェース
 */
pub mod assignment_repo;
pub mod error;

#[cfg(test)]
pub mod memory;
