//! Declarative access policy per operation, plus the role and ownership checks.
//!
//! Routes declare an `Operation`; the access middleware authenticates and checks roles
//! before dispatch. Ownership needs the stored record, so the handler applies
//! `AccessPolicy::authorize_resource` once it has loaded it.

use crate::api::extractors::Identity;
use crate::error::AppError;

pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPublications,
    GetPublication,
    CreatePublication,
    UpdatePublication,
    DeletePublication,
}

/// Creator of the resource, or anyone holding `elevated_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipRule {
    pub elevated_role: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub authenticate: bool,
    pub required_roles: &'static [&'static str],
    pub ownership: Option<OwnershipRule>,
}

impl AccessPolicy {
    pub const PUBLIC: Self = Self {
        authenticate: false,
        required_roles: &[],
        ownership: None,
    };

    /// Ownership part of the policy; a no-op for operations that declare none.
    pub fn authorize_resource(&self, identity: &Identity, owner_id: &str) -> Result<(), AppError> {
        match self.ownership {
            Some(rule) => authorize_owner_or_elevated(identity, owner_id, rule.elevated_role),
            None => Ok(()),
        }
    }
}

impl Operation {
    pub const fn policy(self) -> AccessPolicy {
        match self {
            Operation::ListPublications | Operation::GetPublication => AccessPolicy::PUBLIC,
            Operation::CreatePublication => AccessPolicy {
                authenticate: true,
                required_roles: &[ROLE_EDITOR],
                ownership: None,
            },
            Operation::UpdatePublication => AccessPolicy {
                authenticate: true,
                required_roles: &[],
                ownership: Some(OwnershipRule {
                    elevated_role: ROLE_ADMIN,
                }),
            },
            Operation::DeletePublication => AccessPolicy {
                authenticate: true,
                required_roles: &[ROLE_ADMIN],
                ownership: None,
            },
        }
    }
}

/// Any-of role check. No required roles means anyone passes, even without an identity.
pub fn authorize(identity: Option<&Identity>, required_roles: &[&str]) -> Result<(), AppError> {
    if required_roles.is_empty() {
        return Ok(());
    }

    let identity = identity.ok_or(AppError::IdentityMissing)?;

    if required_roles.iter().any(|required| identity.has_role(required)) {
        Ok(())
    } else {
        Err(AppError::InsufficientRole)
    }
}

pub fn authorize_owner_or_elevated(
    identity: &Identity,
    owner_id: &str,
    elevated_role: &str,
) -> Result<(), AppError> {
    if identity.user_id == owner_id || identity.has_role(elevated_role) {
        Ok(())
    } else {
        Err(AppError::ForbiddenNotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(user_id: &str, roles: &[&str]) -> Identity {
        Identity::new(
            user_id.to_string(),
            roles.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn no_required_roles_always_passes() {
        assert!(authorize(Some(&identity("u1", &[])), &[]).is_ok());
        assert!(authorize(Some(&identity("u1", &["admin"])), &[]).is_ok());
        assert!(authorize(None, &[]).is_ok());
    }

    #[test]
    fn admin_requirement_passes_only_for_admins() {
        assert!(authorize(Some(&identity("u1", &["editor", "admin"])), &["admin"]).is_ok());
        assert!(matches!(
            authorize(Some(&identity("u1", &["editor"])), &["admin"]),
            Err(AppError::InsufficientRole)
        ));
        assert!(matches!(
            authorize(Some(&identity("u1", &[])), &["admin"]),
            Err(AppError::InsufficientRole)
        ));
    }

    #[test]
    fn role_matching_is_exact_and_case_sensitive() {
        assert!(authorize(Some(&identity("u1", &["Admin"])), &["admin"]).is_err());
        assert!(authorize(Some(&identity("u1", &["admin "])), &["admin"]).is_err());
    }

    #[test]
    fn any_overlap_is_enough() {
        assert!(authorize(Some(&identity("u1", &["viewer", "editor"])), &["admin", "editor"]).is_ok());
    }

    #[test]
    fn missing_identity_is_forbidden_when_roles_are_required() {
        assert!(matches!(
            authorize(None, &["editor"]),
            Err(AppError::IdentityMissing)
        ));
    }

    #[test]
    fn owner_or_elevated_role_may_proceed() {
        assert!(authorize_owner_or_elevated(&identity("u1", &[]), "u1", "admin").is_ok());
        assert!(authorize_owner_or_elevated(&identity("u2", &["admin"]), "u1", "admin").is_ok());
        assert!(matches!(
            authorize_owner_or_elevated(&identity("u2", &["editor"]), "u1", "admin"),
            Err(AppError::ForbiddenNotOwner)
        ));
    }

    #[test]
    fn policy_table_matches_the_routes() {
        assert_eq!(Operation::ListPublications.policy(), AccessPolicy::PUBLIC);
        assert_eq!(Operation::GetPublication.policy(), AccessPolicy::PUBLIC);

        let create = Operation::CreatePublication.policy();
        assert!(create.authenticate);
        assert_eq!(create.required_roles, &[ROLE_EDITOR]);
        assert_eq!(create.ownership, None);

        let update = Operation::UpdatePublication.policy();
        assert!(update.authenticate);
        assert!(update.required_roles.is_empty());
        assert_eq!(
            update.ownership,
            Some(OwnershipRule {
                elevated_role: ROLE_ADMIN
            })
        );

        let delete = Operation::DeletePublication.policy();
        assert_eq!(delete.required_roles, &[ROLE_ADMIN]);
        assert_eq!(delete.ownership, None);
    }

    #[test]
    fn resource_check_is_skipped_without_an_ownership_rule() {
        let stranger = identity("u9", &[]);

        assert!(
            Operation::DeletePublication
                .policy()
                .authorize_resource(&stranger, "u1")
                .is_ok()
        );
        assert!(
            Operation::UpdatePublication
                .policy()
                .authorize_resource(&stranger, "u1")
                .is_err()
        );
    }
}
