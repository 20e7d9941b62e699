// ============================================================================
// Console Core - Application Service
// File: crates/console-core/src/services/application_service.rs
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::context::SecurityContext;
use crate::domain::{Application, ApplicationDraft};
use crate::error::DomainError;
use crate::repositories::ApplicationRepository;

pub struct ApplicationService {
    repo: Arc<dyn ApplicationRepository>,
}

impl ApplicationService {
    pub fn new(repo: Arc<dyn ApplicationRepository>) -> Self {
        Self { repo }
    }

    /// Applications the caller may access, as filtered by row policies.
    pub async fn list_mine(&self, ctx: &SecurityContext) -> Result<Vec<Application>, DomainError> {
        let apps = self.repo.list_visible(ctx).await?;
        debug!("Caller sees {} applications", apps.len());
        Ok(apps)
    }

    pub async fn list_all(&self, ctx: &SecurityContext) -> Result<Vec<Application>, DomainError> {
        self.repo.list_all(ctx).await
    }

    pub async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<Application, DomainError> {
        self.repo
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Application", id))
    }

    pub async fn create(&self, ctx: &SecurityContext, description: &str) -> Result<Application, DomainError> {
        let draft = ApplicationDraft::new(description)?;
        let app = self.repo.create(ctx, draft).await?;
        info!("Application created: {}", app.id);
        Ok(app)
    }

    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        description: Option<&str>,
    ) -> Result<Application, DomainError> {
        let description = description.ok_or_else(|| DomainError::validation("No data to update"))?;
        let draft = ApplicationDraft::new(description)?;

        let app = self.repo.update(ctx, id, draft).await?;
        info!("Application updated: {}", app.id);
        Ok(app)
    }

    pub async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(ctx, id).await?;
        info!("Application deactivated: {}", id);
        Ok(())
    }
}
