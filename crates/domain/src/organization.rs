use pollsmith_core::{NonEmptyString, OrganizationId};
use serde::{Deserialize, Serialize};

/// Organization record resolved from an environment scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    id: OrganizationId,
    name: NonEmptyString,
}

impl Organization {
    /// Creates an organization record.
    #[must_use]
    pub fn new(id: OrganizationId, name: NonEmptyString) -> Self {
        Self { id, name }
    }

    /// Returns the organization identifier.
    #[must_use]
    pub fn id(&self) -> OrganizationId {
        self.id
    }

    /// Returns the organization name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
