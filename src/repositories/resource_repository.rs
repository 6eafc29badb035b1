// src/repositories/resource_repository.rs - /resources/api/ endpoints

use log::{debug, warn};
use reqwest::Method;

use crate::dtos::resource_dtos::{ResourceFields, ResourceStatusOut};
use crate::error::ClientError;
use crate::models::resource::Resource;
use crate::repositories::api_client::ApiClient;

#[derive(Clone)]
pub struct ResourceRepository {
    api: ApiClient,
}

impl ResourceRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Resource>, ClientError> {
        let response = self.api.request(Method::GET, "/resources/api/").send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), body });
        }

        let resources: Vec<Resource> = serde_json::from_str(&body)?;
        debug!("fetched {} resources", resources.len());
        Ok(resources)
    }

    pub async fn add(&self, fields: &ResourceFields) -> Result<(), ClientError> {
        let response = self
            .api
            .request(Method::POST, "/resources/api/add/")
            .json(fields)
            .send()
            .await?;
        Self::log_status("add", response).await
    }

    pub async fn edit(&self, id: i64, fields: &ResourceFields) -> Result<(), ClientError> {
        let response = self
            .api
            .request(Method::POST, &format!("/resources/api/edit/{}/", id))
            .json(fields)
            .send()
            .await?;
        Self::log_status("edit", response).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .api
            .request(Method::DELETE, &format!("/resources/api/delete/{}/", id))
            .send()
            .await?;
        Self::log_status("delete", response).await
    }

    /// The mutation responses carry nothing the catalog acts on.
    async fn log_status(op: &str, response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if !status.is_success() {
            warn!("resource {} returned {}", op, status);
            return Ok(());
        }
        match response.json::<ResourceStatusOut>().await {
            Ok(out) => debug!("resource {}: status={} id={:?}", op, out.status, out.id),
            Err(e) => debug!("resource {}: unreadable body ({})", op, e),
        }
        Ok(())
    }
}
