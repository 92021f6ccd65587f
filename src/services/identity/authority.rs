use super::principal::Principal;

pub const SUPER_ADMIN: &str = "ROLE_SUPER_ADMIN";
pub const HOSPITAL_ADMIN: &str = "ROLE_HOSPITAL_ADMIN";
pub const RECEPTIONIST: &str = "ROLE_RECEPTIONIST";

/// Case-insensitive membership test on the caller's granted authorities.
pub fn has_authority(principal: Option<&Principal>, authority: &str) -> bool {
    principal.is_some_and(|p| {
        p.authorities
            .iter()
            .any(|granted| granted.eq_ignore_ascii_case(authority))
    })
}
