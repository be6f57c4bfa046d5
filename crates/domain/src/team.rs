use std::str::FromStr;

use pollsmith_core::AppError;
use serde::{Deserialize, Serialize};

/// Fine-grained permission tier a principal holds on a project through team
/// assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamPermission {
    /// May view project resources only.
    Read,
    /// May view and modify project resources.
    ReadWrite,
    /// May modify resources and manage team assignment.
    Manage,
}

impl TeamPermission {
    /// Returns a stable storage value for this permission tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWrite => "read_write",
            Self::Manage => "manage",
        }
    }

    /// Returns all known permission tiers.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TeamPermission] = &[
            TeamPermission::Read,
            TeamPermission::ReadWrite,
            TeamPermission::Manage,
        ];

        ALL
    }
}

impl FromStr for TeamPermission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "read_write" => Ok(Self::ReadWrite),
            "manage" => Ok(Self::Manage),
            _ => Err(AppError::Validation(format!(
                "unknown team permission '{value}'"
            ))),
        }
    }
}

/// Fine-grained flags derived from a project permission tier.
///
/// The mapping is total over `Option<TeamPermission>`. A principal without a
/// permission record resolves to `has_read_access = true`: the most
/// restrictive outcome the downstream read-only gate can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPermissionFlags {
    /// Principal may only read project resources.
    pub has_read_access: bool,
    /// Principal may read and write project resources.
    pub has_read_write_access: bool,
    /// Principal may manage the project team.
    pub has_manage_access: bool,
}

impl TeamPermissionFlags {
    /// Derives the fine-grained flags for an optional permission tier.
    #[must_use]
    pub fn from_permission(permission: Option<TeamPermission>) -> Self {
        match permission {
            Some(TeamPermission::Read) | None => Self {
                has_read_access: true,
                has_read_write_access: false,
                has_manage_access: false,
            },
            Some(TeamPermission::ReadWrite) => Self {
                has_read_access: false,
                has_read_write_access: true,
                has_manage_access: false,
            },
            Some(TeamPermission::Manage) => Self {
                has_read_access: false,
                has_read_write_access: false,
                has_manage_access: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{TeamPermission, TeamPermissionFlags};

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in TeamPermission::all() {
            let restored = TeamPermission::from_str(permission.as_str());
            assert_eq!(restored.ok(), Some(*permission));
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = TeamPermission::from_str("write");
        assert!(parsed.is_err());
    }

    #[test]
    fn absent_permission_record_defaults_to_read_access() {
        let flags = TeamPermissionFlags::from_permission(None);
        assert!(flags.has_read_access);
        assert!(!flags.has_read_write_access);
        assert!(!flags.has_manage_access);
    }

    #[test]
    fn each_tier_sets_exactly_one_flag() {
        for permission in TeamPermission::all() {
            let flags = TeamPermissionFlags::from_permission(Some(*permission));
            let set = [
                flags.has_read_access,
                flags.has_read_write_access,
                flags.has_manage_access,
            ]
            .into_iter()
            .filter(|flag| *flag)
            .count();
            assert_eq!(set, 1);
        }
    }
}
