/*
 * Responsibility
 * - UserId / HospitalId の newtype (中身は UUID)
 * - 文字列からの parse は FromStr に集約する
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a user account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(Uuid);

/// Identifier of a hospital (tenant).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct HospitalId(Uuid);

macro_rules! uuid_newtype {
    ($name:ident) => {
        #[cfg(test)]
        impl $name {
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }
    };
}

uuid_newtype!(UserId);
uuid_newtype!(HospitalId);

impl HospitalId {
    /// Drops the "not provided" sentinel (nil UUID) so callers only see real ids.
    pub fn provided(candidate: Option<HospitalId>) -> Option<HospitalId> {
        candidate.filter(|id| !id.0.is_nil())
    }
}
