//! Service context - dependency container for services
//!
//! Holds the repositories and the store operation timeout shared by all services.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use insight_core::traits::{InsightRepository, ReactionRepository};
use insight_core::DomainError;
use insight_db::{PgInsightRepository, PgPool, PgReactionRepository};

use super::error::{ServiceError, ServiceResult};

/// Default bound on a single store operation
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
///
/// Cheap to clone; every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    insight_repo: Arc<dyn InsightRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Upper bound on any single store round
    operation_timeout: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        insight_repo: Arc<dyn InsightRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            insight_repo,
            reaction_repo,
            operation_timeout,
        }
    }

    /// Wire the PostgreSQL repositories over one pool
    pub fn postgres(pool: PgPool, operation_timeout: Duration) -> Self {
        Self::new(
            Arc::new(PgInsightRepository::new(pool.clone())),
            Arc::new(PgReactionRepository::new(pool)),
            operation_timeout,
        )
    }

    // === Repositories ===

    /// Get the insight repository
    pub fn insight_repo(&self) -> &dyn InsightRepository {
        self.insight_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Timeouts ===

    /// Get the store operation timeout
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Run a store operation under the operation timeout
    ///
    /// On expiry the future is dropped, which rolls back any open unit of
    /// work, and the caller gets [`DomainError::OperationTimedOut`].
    pub async fn bounded<T, F>(&self, operation: F) -> ServiceResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                let millis = u64::try_from(self.operation_timeout.as_millis()).unwrap_or(u64::MAX);
                Err(ServiceError::Domain(DomainError::OperationTimedOut(millis)))
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    insight_repo: Option<Arc<dyn InsightRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    operation_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            insight_repo: None,
            reaction_repo: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn insight_repo(mut self, repo: Arc<dyn InsightRepository>) -> Self {
        self.insight_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.operation_timeout.is_zero() {
            return Err(ServiceError::validation("operation_timeout must be positive"));
        }
        Ok(ServiceContext::new(
            self.insight_repo
                .ok_or_else(|| ServiceError::validation("insight_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.operation_timeout,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_builder_requires_repositories() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("insight_repo"));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let store = Arc::new(MemoryStore::new());
        let result = ServiceContextBuilder::new()
            .insight_repo(store.clone())
            .reaction_repo(store)
            .operation_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let store = Arc::new(MemoryStore::new());
        let ctx = ServiceContextBuilder::new()
            .insight_repo(store.clone())
            .reaction_repo(store)
            .operation_timeout(Duration::from_millis(20))
            .build()
            .unwrap();

        let err = ctx
            .bounded(async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(err.is_outcome_unknown());
        assert_eq!(err.error_code(), "OUTCOME_UNKNOWN");
    }
}
