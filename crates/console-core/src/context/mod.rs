//! Request-scoped security context and its propagation into the store.

pub mod security_context;
pub mod store;
pub mod manager;

pub use security_context::SecurityContext;
pub use store::{IdentityBinder, PolicyFunctions, TransactionalStore};
pub use manager::{SecurityContextManager, UnitFuture};
