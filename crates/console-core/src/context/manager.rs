// ============================================================================
// Console Core - Security Context Manager
// File: crates/console-core/src/context/manager.rs
// ============================================================================
//! Runs one unit of work inside a transaction bound to the caller's identity.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, error, info_span, Instrument};

use console_shared::utils::mask_email;

use crate::context::security_context::SecurityContext;
use crate::context::store::IdentityBinder;
use crate::error::DomainError;

/// Future returned by a unit of work borrowing the transaction for `'t`.
pub type UnitFuture<'t, T> = BoxFuture<'t, Result<T, DomainError>>;

/// Owns the injected store handle and scopes every data-access call to a
/// single identity-bound transaction.
pub struct SecurityContextManager<S> {
    store: Arc<S>,
}

impl<S> Clone for SecurityContextManager<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: IdentityBinder> SecurityContextManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Begins a transaction, binds the principal, runs `unit` exactly once,
    /// then commits on success or rolls back and returns the original error.
    ///
    /// If the returned future is dropped before completion the transaction
    /// handle is dropped uncommitted, which rolls it back.
    pub async fn run_with_context<T, F>(&self, context: &SecurityContext, unit: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut S::Tx) -> UnitFuture<'t, T> + Send,
    {
        let principal = context.principal();
        let span = info_span!(
            "security_context",
            user_id = %principal.id,
            email = %mask_email(&principal.email),
            role = %principal.role,
            credential = %context.fingerprint(),
        );

        async move {
            let mut tx = self.store.begin().await?;

            if let Err(e) = self.store.bind_identity(&mut tx, principal).await {
                error!("Identity binding rejected: {}", e);
                self.rollback_quietly(tx).await;
                return Err(e);
            }

            match unit(&mut tx).await {
                Ok(value) => {
                    self.store.commit(tx).await.map_err(|e| {
                        error!("Commit failed: {}", e);
                        e
                    })?;
                    debug!("Unit of work committed");
                    Ok(value)
                }
                Err(e) => {
                    if e.is_internal() {
                        error!("Unit of work failed, rolling back: {}", e);
                    } else {
                        debug!("Unit of work rejected, rolling back: {}", e);
                    }
                    self.rollback_quietly(tx).await;
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    // A failed rollback must not mask the error that caused it.
    async fn rollback_quietly(&self, tx: S::Tx) {
        if let Err(e) = self.store.rollback(tx).await {
            error!("Rollback failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, FakeStore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_commits_and_returns_value() {
        let store = Arc::new(FakeStore::default());
        let manager = SecurityContextManager::new(store.clone());

        let result = manager
            .run_with_context(&context("admin"), |tx| {
                Box::pin(async move {
                    tx.record("unit");
                    Ok(42)
                })
            })
            .await;

        assert_eq!(result, Ok(42));
        assert_eq!(store.events(), vec!["begin", "bind", "unit", "commit"]);
    }

    #[tokio::test]
    async fn test_binds_principal_claims() {
        let store = Arc::new(FakeStore::default());
        let manager = SecurityContextManager::new(store.clone());
        let ctx = context("editor");

        manager
            .run_with_context(&ctx, |_tx| Box::pin(async move { Ok(()) }))
            .await
            .unwrap();

        let bound = store.bound_claims();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0]["sub"], ctx.principal().id.to_string());
        assert_eq!(bound[0]["role"], "editor");
    }

    #[tokio::test]
    async fn test_unit_error_rolls_back_and_propagates_unchanged() {
        let store = Arc::new(FakeStore::default());
        let manager = SecurityContextManager::new(store.clone());
        let expected = DomainError::not_found("Application", "abc");
        let raised = expected.clone();

        let err = manager
            .run_with_context(&context("admin"), move |_tx| {
                Box::pin(async move { Err::<(), _>(raised) })
            })
            .await
            .unwrap_err();

        assert_eq!(err, expected);
        assert_eq!(store.events(), vec!["begin", "bind", "rollback"]);
    }

    #[tokio::test]
    async fn test_bind_failure_never_invokes_unit() {
        let store = Arc::new(FakeStore::failing_bind());
        let manager = SecurityContextManager::new(store.clone());
        let calls = Arc::new(AtomicUsize::new(0));
        let unit_calls = calls.clone();

        let err = manager
            .run_with_context(&context("admin"), move |_tx| {
                Box::pin(async move {
                    unit_calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ContextBinding(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.events(), vec!["begin", "rollback"]);
    }

    #[tokio::test]
    async fn test_commit_failure_is_reported() {
        let store = Arc::new(FakeStore::failing_commit());
        let manager = SecurityContextManager::new(store.clone());

        let err = manager
            .run_with_context(&context("admin"), |_tx| Box::pin(async move { Ok(1) }))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Query(_)));
    }

    #[tokio::test]
    async fn test_cancelled_unit_rolls_back_without_commit() {
        let store = Arc::new(FakeStore::default());
        let manager = SecurityContextManager::new(store.clone());
        let ctx = context("admin");

        let outcome = tokio::time::timeout(
            Duration::from_millis(20),
            manager.run_with_context(&ctx, |_tx| {
                Box::pin(async move {
                    futures::future::pending::<()>().await;
                    Ok(())
                })
            }),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(store.events(), vec!["begin", "bind", "dropped"]);
    }
}
