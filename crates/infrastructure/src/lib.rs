//! Infrastructure adapters for the application's collaborator ports.

#![forbid(unsafe_code)]

mod in_memory_integration_repository;
mod postgres_scope_repository;
mod postgres_survey_repository;
mod postgres_webhook_repository;

pub use in_memory_integration_repository::InMemoryIntegrationRepository;
pub use postgres_scope_repository::PostgresScopeRepository;
pub use postgres_survey_repository::PostgresSurveyRepository;
pub use postgres_webhook_repository::PostgresWebhookRepository;
