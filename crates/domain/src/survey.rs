use std::fmt::{Display, Formatter};

use pollsmith_core::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EnvironmentId;

/// Unique identifier for a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyId(Uuid);

impl SurveyId {
    /// Creates a random survey identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a survey identifier from an existing UUID value.
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

impl Default for SurveyId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SurveyId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Survey projection used to cross-reference webhook trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    id: SurveyId,
    environment_id: EnvironmentId,
    name: NonEmptyString,
}

impl Survey {
    /// Creates a survey projection.
    #[must_use]
    pub fn new(id: SurveyId, environment_id: EnvironmentId, name: NonEmptyString) -> Self {
        Self {
            id,
            environment_id,
            name,
        }
    }

    /// Returns the survey identifier.
    #[must_use]
    pub fn id(&self) -> SurveyId {
        self.id
    }

    /// Returns the environment the survey belongs to.
    #[must_use]
    pub fn environment_id(&self) -> EnvironmentId {
        self.environment_id
    }

    /// Returns the survey name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
