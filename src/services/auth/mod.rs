pub mod access_jwt;
pub mod factory;

pub use access_jwt::{AccessJwtError, AuthService};
pub use factory::build_auth_service;
