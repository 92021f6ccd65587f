use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::services::identity::Principal;

/// Errors returned by access-token verification.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
}

/// EdDSA (Ed25519) access-token verifier.
///
/// Signature, `exp`, `iss` and `aud` are checked here. Which hospital the
/// caller acts within is decided later by the scope resolver.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        access_public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AccessJwtError> {
        let decoding_key = DecodingKey::from_ed_pem(access_public_key_pem.as_bytes())?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify and decode the raw claim payload.
    pub fn verify(&self, token: &str) -> Result<Map<String, Value>, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)?;

        if data
            .claims
            .get("iss")
            .and_then(Value::as_str)
            .is_none_or(|s| s.trim().is_empty())
        {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }

        Ok(data.claims)
    }

    /// Verify, then turn the claims into a request principal.
    ///
    /// The subject is not required to be a UUID here; issuers differ in which
    /// claim carries the user id (`uid`, `userId`, `id`, `sub`).
    pub fn authenticate(&self, token: &str) -> Result<Principal, AccessJwtError> {
        let claims = self.verify(token)?;
        Ok(Principal::from_token_claims(&claims))
    }
}
