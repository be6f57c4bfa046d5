use std::fmt::{Display, Formatter};
use std::str::FromStr;

use pollsmith_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentId(Uuid);

impl EnvironmentId {
    /// Creates a random environment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an environment identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EnvironmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EnvironmentId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Unique identifier for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a random project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a project identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ProjectId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Deployment stage an environment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    /// Live environment serving real respondents.
    Production,
    /// Sandbox environment for building and testing.
    Development,
}

impl EnvironmentType {
    /// Returns a stable storage value for this environment type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl FromStr for EnvironmentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            _ => Err(AppError::Validation(format!(
                "unknown environment type '{value}'"
            ))),
        }
    }
}

/// Environment record scoping surveys, webhooks, and team permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    id: EnvironmentId,
    project_id: ProjectId,
    environment_type: EnvironmentType,
}

impl Environment {
    /// Creates an environment record.
    #[must_use]
    pub fn new(id: EnvironmentId, project_id: ProjectId, environment_type: EnvironmentType) -> Self {
        Self {
            id,
            project_id,
            environment_type,
        }
    }

    /// Returns the environment identifier.
    #[must_use]
    pub fn id(&self) -> EnvironmentId {
        self.id
    }

    /// Returns the project the environment belongs to.
    #[must_use]
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the deployment stage.
    #[must_use]
    pub fn environment_type(&self) -> EnvironmentType {
        self.environment_type
    }
}
