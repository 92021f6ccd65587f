/*
 * Responsibility
 * - handler から使うドメイン寄りのサービス群
 */
pub mod auth;
pub mod identity;
pub mod sanitize;
pub mod scope;
