use std::str::FromStr;

use pollsmith_core::{AppError, OrganizationId, UserId};
use serde::{Deserialize, Serialize};

/// Role a principal holds inside an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationRole {
    /// Full control over the organization, including deletion.
    Owner,
    /// Administers members, projects, and billing-adjacent settings.
    Manager,
    /// Regular contributor; project access is governed by team permissions.
    Member,
    /// Billing-only access without project visibility.
    Billing,
}

impl OrganizationRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Member => "member",
            Self::Billing => "billing",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[OrganizationRole] = &[
            OrganizationRole::Owner,
            OrganizationRole::Manager,
            OrganizationRole::Member,
            OrganizationRole::Billing,
        ];

        ALL
    }
}

impl FromStr for OrganizationRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            "billing" => Ok(Self::Billing),
            _ => Err(AppError::Validation(format!(
                "unknown organization role '{value}'"
            ))),
        }
    }
}

/// Coarse access flags derived from an organization role.
///
/// The mapping is total over `Option<OrganizationRole>`: a missing membership
/// yields no elevated access (every flag false). `is_member` marks the
/// restricted tier; the other three mark privileged tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessFlags {
    /// Principal owns the organization.
    pub is_owner: bool,
    /// Principal manages the organization.
    pub is_manager: bool,
    /// Principal is a plain (restricted) member.
    pub is_member: bool,
    /// Principal has billing-only access.
    pub is_billing: bool,
}

impl AccessFlags {
    /// Derives the coarse flags for an optional membership role.
    #[must_use]
    pub fn from_role(role: Option<OrganizationRole>) -> Self {
        match role {
            Some(OrganizationRole::Owner) => Self {
                is_owner: true,
                ..Self::default()
            },
            Some(OrganizationRole::Manager) => Self {
                is_manager: true,
                ..Self::default()
            },
            Some(OrganizationRole::Member) => Self {
                is_member: true,
                ..Self::default()
            },
            Some(OrganizationRole::Billing) => Self {
                is_billing: true,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Returns whether the role grants mutable access regardless of team
    /// permissions.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.is_owner || self.is_manager || self.is_billing
    }
}

/// Membership record linking a principal to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    user_id: UserId,
    organization_id: OrganizationId,
    role: OrganizationRole,
}

impl Membership {
    /// Creates a membership record.
    #[must_use]
    pub fn new(user_id: UserId, organization_id: OrganizationId, role: OrganizationRole) -> Self {
        Self {
            user_id,
            organization_id,
            role,
        }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the organization the membership belongs to.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the organization role.
    #[must_use]
    pub fn role(&self) -> OrganizationRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AccessFlags, OrganizationRole};

    #[test]
    fn role_roundtrip_storage_value() {
        for role in OrganizationRole::all() {
            let restored = OrganizationRole::from_str(role.as_str());
            assert_eq!(restored.ok(), Some(*role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = OrganizationRole::from_str("superadmin");
        assert!(parsed.is_err());
    }

    #[test]
    fn each_role_sets_exactly_one_flag() {
        for role in OrganizationRole::all() {
            let flags = AccessFlags::from_role(Some(*role));
            let set = [flags.is_owner, flags.is_manager, flags.is_member, flags.is_billing]
                .into_iter()
                .filter(|flag| *flag)
                .count();
            assert_eq!(set, 1, "role {} must map to exactly one flag", role.as_str());
        }
    }

    #[test]
    fn missing_membership_grants_no_elevated_access() {
        let flags = AccessFlags::from_role(None);
        assert_eq!(flags, AccessFlags::default());
        assert!(!flags.is_privileged());
    }

    #[test]
    fn only_member_role_is_restricted() {
        assert!(!AccessFlags::from_role(Some(OrganizationRole::Member)).is_privileged());
        assert!(AccessFlags::from_role(Some(OrganizationRole::Owner)).is_privileged());
        assert!(AccessFlags::from_role(Some(OrganizationRole::Manager)).is_privileged());
        assert!(AccessFlags::from_role(Some(OrganizationRole::Billing)).is_privileged());
    }
}
