// src/services/catalog_services.rs - resource catalog: fetch, render, mutate, reload

use log::{info, warn};
use tokio::sync::Mutex;

use crate::dtos::resource_dtos::ResourceFields;
use crate::error::ClientError;
use crate::models::resource::Resource;
use crate::repositories::api_client::ApiClient;
use crate::repositories::resource_repository::ResourceRepository;
use crate::services::in_flight::{ActionKey, InFlight};
use crate::services::Outcome;
use crate::views::catalog_view::CatalogView;

pub struct CatalogService {
    repo: ResourceRepository,
    view: Mutex<CatalogView>,
    in_flight: InFlight,
}

impl CatalogService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            repo: ResourceRepository::new(api),
            view: Mutex::new(CatalogView::default()),
            in_flight: InFlight::default(),
        }
    }

    /// Re-fetches the whole set and replaces every card. On failure the
    /// current cards stay as they are.
    pub async fn list(&self) -> Result<usize, ClientError> {
        let resources = self.repo.list().await?;
        let count = resources.len();
        self.view.lock().await.replace(resources);
        Ok(count)
    }

    pub async fn add(&self, fields: ResourceFields) -> Outcome {
        let Some(_guard) = self.in_flight.try_begin(ActionKey::AddResource) else {
            return Outcome::Ignored;
        };

        let sent = self.repo.add(&fields).await;
        if let Err(ref e) = sent {
            warn!("add resource '{}' failed: {}", fields.title, e);
        }
        self.reload_after(sent).await
    }

    /// An empty title aborts before anything is sent.
    pub async fn edit(&self, id: i64, fields: ResourceFields) -> Outcome {
        if !fields.has_title() {
            info!("edit of resource {} skipped: no title", id);
            return Outcome::Ignored;
        }
        let Some(_guard) = self.in_flight.try_begin(ActionKey::EditResource(id)) else {
            return Outcome::Ignored;
        };

        let sent = self.repo.edit(id, &fields).await;
        if let Err(ref e) = sent {
            warn!("edit resource {} failed: {}", id, e);
        }
        self.reload_after(sent).await
    }

    pub async fn delete(&self, id: i64) -> Outcome {
        let Some(_guard) = self.in_flight.try_begin(ActionKey::DeleteResource(id)) else {
            return Outcome::Ignored;
        };

        let sent = self.repo.delete(id).await;
        if let Err(ref e) = sent {
            warn!("delete resource {} failed: {}", id, e);
        }
        self.reload_after(sent).await
    }

    /// The list is reloaded whether or not the mutation went through.
    async fn reload_after(&self, sent: Result<(), ClientError>) -> Outcome {
        let reloaded = self.list().await;
        if let Err(ref e) = reloaded {
            warn!("reloading resources failed: {}", e);
        }
        match (sent, reloaded) {
            (Ok(()), Ok(_)) => Outcome::Applied,
            _ => Outcome::Failed,
        }
    }

    pub async fn cards(&self) -> Vec<Resource> {
        self.view.lock().await.cards().to_vec()
    }

    pub async fn render(&self) -> String {
        self.view.lock().await.render()
    }
}
