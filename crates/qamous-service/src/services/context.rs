//! Service context - dependency container for services
//!
//! Holds the repositories and the JWT service every service needs.

use std::sync::Arc;

use qamous_common::auth::JwtService;
use qamous_core::traits::{DefinitionRepository, ReactionRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Repositories are trait objects so the same services run against PostgreSQL
/// or the in-memory store.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    definition_repo: Arc<dyn DefinitionRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        definition_repo: Arc<dyn DefinitionRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            definition_repo,
            reaction_repo,
            jwt_service,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the definition repository
    pub fn definition_repo(&self) -> &dyn DefinitionRepository {
        self.definition_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    definition_repo: Option<Arc<dyn DefinitionRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn definition_repo(mut self, repo: Arc<dyn DefinitionRepository>) -> Self {
        self.definition_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.definition_repo
                .ok_or_else(|| ServiceError::validation("definition_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_reports_missing_dependency() {
        let err = ServiceContextBuilder::new()
            .jwt_service(Arc::new(JwtService::new("secret", 60)))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: user_repo is required");
    }
}
