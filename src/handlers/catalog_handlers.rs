// src/handlers/catalog_handlers.rs - user events on the resource catalog page

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::dtos::resource_dtos::ResourceFields;
use crate::services::catalog_services::CatalogService;
use crate::services::Outcome;

#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// Page load.
    Load,
    /// `#add-btn` clicked with the form's current values.
    Add(ResourceFields),
    Edit { id: i64, fields: ResourceFields },
    Delete(i64),
}

/// Event registration scoped to one catalog page. After `detach` every
/// event is ignored.
pub struct CatalogHandlers {
    service: Arc<CatalogService>,
    attached: AtomicBool,
}

impl CatalogHandlers {
    pub fn attach(service: Arc<CatalogService>) -> Self {
        Self { service, attached: AtomicBool::new(true) }
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }

    pub async fn handle(&self, event: CatalogEvent) -> Outcome {
        if !self.is_attached() {
            debug!("catalog detached, dropping {:?}", event);
            return Outcome::Ignored;
        }

        match event {
            CatalogEvent::Load => match self.service.list().await {
                Ok(count) => {
                    debug!("catalog loaded {} resources", count);
                    Outcome::Applied
                }
                Err(e) => {
                    warn!("loading resources failed: {}", e);
                    Outcome::Failed
                }
            },
            CatalogEvent::Add(fields) => self.service.add(fields).await,
            CatalogEvent::Edit { id, fields } => self.service.edit(id, fields).await,
            CatalogEvent::Delete(id) => self.service.delete(id).await,
        }
    }
}
