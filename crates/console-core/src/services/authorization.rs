// ============================================================================
// Console Core - Authorization Resolver
// File: crates/console-core/src/services/authorization.rs
// ============================================================================
//! Boolean access checks answered by the store's policy functions.
//!
//! Both checks fail closed: a missing result or any failure reads as `false`.

use async_trait::async_trait;
use tracing::{debug, error};
use uuid::Uuid;

use crate::context::{IdentityBinder, PolicyFunctions, SecurityContext, SecurityContextManager};

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AccessResolver: Send + Sync {
    async fn has_application_access(&self, ctx: &SecurityContext, application_id: Uuid) -> bool;
    async fn is_administrator(&self, ctx: &SecurityContext) -> bool;
}

pub struct AuthorizationResolver<S> {
    manager: SecurityContextManager<S>,
}

impl<S> AuthorizationResolver<S>
where
    S: IdentityBinder + PolicyFunctions + 'static,
{
    pub fn new(manager: SecurityContextManager<S>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl<S> AccessResolver for AuthorizationResolver<S>
where
    S: IdentityBinder + PolicyFunctions + 'static,
{
    async fn has_application_access(&self, ctx: &SecurityContext, application_id: Uuid) -> bool {
        let store = self.manager.store();
        let result = self
            .manager
            .run_with_context(ctx, move |tx| {
                Box::pin(async move { store.application_access(tx, application_id).await })
            })
            .await;

        match result {
            Ok(Some(granted)) => granted,
            Ok(None) => {
                debug!("Access check for application {} returned no value", application_id);
                false
            }
            Err(e) => {
                error!("Access check for application {} failed: {}", application_id, e);
                false
            }
        }
    }

    async fn is_administrator(&self, ctx: &SecurityContext) -> bool {
        let store = self.manager.store();
        let result = self
            .manager
            .run_with_context(ctx, move |tx| Box::pin(async move { store.administrator(tx).await }))
            .await;

        match result {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                error!("Administrator check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::error::DomainError;
    use crate::testing::{context, FakeStore};

    fn build(store: FakeStore) -> (Arc<FakeStore>, AuthorizationResolver<FakeStore>) {
        let store = Arc::new(store);
        let manager = SecurityContextManager::new(store.clone());
        (store, AuthorizationResolver::new(manager))
    }

    #[tokio::test]
    async fn test_access_granted() {
        let (store, resolver) = build(FakeStore::default());
        let app = Uuid::new_v4();

        assert!(resolver.has_application_access(&context("user"), app).await);
        assert_eq!(store.access_calls(), vec![app]);
        assert_eq!(store.events(), vec!["begin", "bind", "fn_acceso_app", "commit"]);
    }

    #[tokio::test]
    async fn test_access_denied_and_null_read_false() {
        let (_, denied) = build(FakeStore::with_policy(Ok(Some(false)), Ok(None)));
        assert!(!denied.has_application_access(&context("user"), Uuid::new_v4()).await);

        let (_, empty) = build(FakeStore::with_policy(Ok(None), Ok(None)));
        assert!(!empty.has_application_access(&context("user"), Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_store_error_fails_closed() {
        let failure = Err(DomainError::Query("connection reset".to_string()));
        let (store, resolver) = build(FakeStore::with_policy(failure.clone(), failure));

        assert!(!resolver.has_application_access(&context("admin"), Uuid::new_v4()).await);
        assert!(!resolver.is_administrator(&context("admin")).await);
        assert!(store.events().contains(&"rollback"));
    }

    #[tokio::test]
    async fn test_bind_failure_fails_closed_without_calling_function() {
        let (store, resolver) = build(FakeStore::failing_bind());

        assert!(!resolver.has_application_access(&context("admin"), Uuid::new_v4()).await);
        assert!(store.access_calls().is_empty());
    }

    #[tokio::test]
    async fn test_administrator() {
        let (store, resolver) = build(FakeStore::default());
        let ctx = context("admin");

        assert!(resolver.is_administrator(&ctx).await);
        assert_eq!(store.bound_claims()[0]["sub"], ctx.principal().id.to_string());

        let (_, resolver) = resolver_with_admin(Ok(Some(false)));
        assert!(!resolver.is_administrator(&ctx).await);

        let (_, resolver) = resolver_with_admin(Ok(None));
        assert!(!resolver.is_administrator(&ctx).await);
    }

    fn resolver_with_admin(
        admin: Result<Option<bool>, DomainError>,
    ) -> (Arc<FakeStore>, AuthorizationResolver<FakeStore>) {
        build(FakeStore::with_policy(Ok(Some(true)), admin))
    }
}
