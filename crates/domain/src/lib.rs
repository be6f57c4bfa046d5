//! Domain types for organizations, environments, memberships, and the
//! webhook integration surface.

#![forbid(unsafe_code)]

mod environment;
mod membership;
mod organization;
mod survey;
mod team;
mod webhook;

pub use environment::{Environment, EnvironmentId, EnvironmentType, ProjectId};
pub use membership::{AccessFlags, Membership, OrganizationRole};
pub use organization::Organization;
pub use survey::{Survey, SurveyId};
pub use team::{TeamPermission, TeamPermissionFlags};
pub use webhook::{Webhook, WebhookId, WebhookSource};
