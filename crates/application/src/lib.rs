//! Application services and collaborator ports for the webhook integration
//! surface.

#![forbid(unsafe_code)]

mod access_service;
mod integration_ports;
mod webhook_view_service;

pub use access_service::{AccessService, EnvironmentAccess};
pub use integration_ports::{
    EnvironmentRepository, MembershipRepository, OrganizationRepository, SessionSource,
    SurveyRepository, TeamRepository, WebhookRepository,
};
pub use webhook_view_service::{DEFAULT_SURVEY_FETCH_LIMIT, WebhookOverview, WebhookViewService};
