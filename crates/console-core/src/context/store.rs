//! Store capability traits (ports) used by the security context manager.
//!
//! A store that enforces row policies implements [`IdentityBinder`]; policy
//! function calls are a separate capability in [`PolicyFunctions`].

use async_trait::async_trait;
use uuid::Uuid;

use console_security::Principal;

use crate::error::DomainError;

/// Plain transactional access to the relational store.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// One exclusive connection plus its open transaction. Dropping it
    /// without calling `commit` must roll the transaction back and release
    /// the connection.
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, DomainError>;
    async fn commit(&self, tx: Self::Tx) -> Result<(), DomainError>;
    async fn rollback(&self, tx: Self::Tx) -> Result<(), DomainError>;
}

/// Stores whose declarative row policies read the caller from session state.
#[async_trait]
pub trait IdentityBinder: TransactionalStore {
    /// Binds the principal into transaction-local session state. Fails with
    /// [`DomainError::ContextBinding`] when the store rejects the assignment.
    async fn bind_identity(&self, tx: &mut Self::Tx, principal: &Principal) -> Result<(), DomainError>;
}

/// Store-side authorization functions evaluated against the bound identity.
#[async_trait]
pub trait PolicyFunctions: TransactionalStore {
    /// `None` when the function produced no row or a NULL.
    async fn application_access(&self, tx: &mut Self::Tx, application_id: Uuid) -> Result<Option<bool>, DomainError>;

    async fn administrator(&self, tx: &mut Self::Tx) -> Result<Option<bool>, DomainError>;
}
