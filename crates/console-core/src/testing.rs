//! In-memory store double recording the transaction lifecycle.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use console_security::Principal;
use console_shared::types::AuditFields;

use crate::context::{IdentityBinder, PolicyFunctions, SecurityContext, TransactionalStore};
use crate::domain::{Application, Menu, Profile};
use crate::error::DomainError;

type Events = Arc<Mutex<Vec<&'static str>>>;

pub fn context(role: &str) -> SecurityContext {
    let principal = Principal {
        id: Uuid::new_v4(),
        email: "operator@example.com".to_string(),
        role: role.to_string(),
    };
    SecurityContext::new(principal, format!("token-{}", Uuid::new_v4())).unwrap()
}

pub fn audit() -> AuditFields {
    AuditFields {
        created_at: Utc::now(),
        created_by: "operator@example.com".to_string(),
        updated_at: None,
        updated_by: None,
    }
}

pub fn application(description: &str) -> Application {
    Application {
        id: Uuid::new_v4(),
        description: description.to_string(),
        audit: audit(),
        active: true,
    }
}

pub fn profile(application_id: Uuid) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        application_id,
        description: "Operators".to_string(),
        audit: audit(),
        active: true,
    }
}

pub fn menu(application_id: Uuid, parent_menu_id: Option<Uuid>) -> Menu {
    Menu {
        id: Uuid::new_v4(),
        application_id,
        description: "Reports".to_string(),
        parent_menu_id,
        icon: None,
        path: None,
        audit: audit(),
        active: true,
    }
}

pub struct FakeTx {
    events: Events,
    finished: bool,
}

impl FakeTx {
    pub fn record(&self, event: &'static str) {
        self.events.lock().unwrap().push(event);
    }
}

impl Drop for FakeTx {
    fn drop(&mut self) {
        if !self.finished {
            self.record("dropped");
        }
    }
}

pub struct FakeStore {
    events: Events,
    claims: Mutex<Vec<serde_json::Value>>,
    access_calls: Mutex<Vec<Uuid>>,
    fail_bind: bool,
    fail_commit: bool,
    access: Result<Option<bool>, DomainError>,
    admin: Result<Option<bool>, DomainError>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            events: Arc::default(),
            claims: Mutex::default(),
            access_calls: Mutex::default(),
            fail_bind: false,
            fail_commit: false,
            access: Ok(Some(true)),
            admin: Ok(Some(true)),
        }
    }
}

impl FakeStore {
    pub fn failing_bind() -> Self {
        Self { fail_bind: true, ..Self::default() }
    }

    pub fn failing_commit() -> Self {
        Self { fail_commit: true, ..Self::default() }
    }

    pub fn with_policy(
        access: Result<Option<bool>, DomainError>,
        admin: Result<Option<bool>, DomainError>,
    ) -> Self {
        Self { access, admin, ..Self::default() }
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    pub fn bound_claims(&self) -> Vec<serde_json::Value> {
        self.claims.lock().unwrap().clone()
    }

    pub fn access_calls(&self) -> Vec<Uuid> {
        self.access_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionalStore for FakeStore {
    type Tx = FakeTx;

    async fn begin(&self) -> Result<FakeTx, DomainError> {
        let tx = FakeTx { events: self.events.clone(), finished: false };
        tx.record("begin");
        Ok(tx)
    }

    async fn commit(&self, mut tx: FakeTx) -> Result<(), DomainError> {
        tx.finished = true;
        if self.fail_commit {
            tx.record("commit-failed");
            return Err(DomainError::Query("commit refused".to_string()));
        }
        tx.record("commit");
        Ok(())
    }

    async fn rollback(&self, mut tx: FakeTx) -> Result<(), DomainError> {
        tx.finished = true;
        tx.record("rollback");
        Ok(())
    }
}

#[async_trait]
impl IdentityBinder for FakeStore {
    async fn bind_identity(&self, tx: &mut FakeTx, principal: &Principal) -> Result<(), DomainError> {
        if self.fail_bind {
            return Err(DomainError::ContextBinding("set_config rejected".to_string()));
        }
        tx.record("bind");
        self.claims.lock().unwrap().push(principal.session_claims());
        Ok(())
    }
}

#[async_trait]
impl PolicyFunctions for FakeStore {
    async fn application_access(&self, tx: &mut FakeTx, application_id: Uuid) -> Result<Option<bool>, DomainError> {
        tx.record("fn_acceso_app");
        self.access_calls.lock().unwrap().push(application_id);
        self.access.clone()
    }

    async fn administrator(&self, tx: &mut FakeTx) -> Result<Option<bool>, DomainError> {
        tx.record("fn_es_admin");
        self.admin.clone()
    }
}
