//! ApiClient adapter that implements the ApiService trait
//!
//! Wraps the reqwest-backed ApiClient to provide a trait-based interface

use async_trait::async_trait;
use bindery_contracts::api::{
    CreateLibraryRequest, CreateTagsRequest, EditLibraryRequest,
};
use bindery_contracts::api_routes;
use bindery_contracts::routes::utils::replace_param;
use bindery_model::{Library, Tag};
use std::sync::Arc;

use crate::infrastructure::ApiClient;
use crate::infrastructure::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::services::api::ApiService;

/// Adapter that implements ApiService using the HTTP ApiClient
#[derive(Debug, Clone)]
pub struct ApiClientAdapter {
    client: Arc<ApiClient>,
}

impl ApiClientAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }
}

#[async_trait]
impl ApiService for ApiClientAdapter {
    async fn fetch_libraries(&self) -> RepositoryResult<Vec<Library>> {
        self.client
            .get(api_routes::libraries::COLLECTION)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn fetch_tags(&self) -> RepositoryResult<Vec<Tag>> {
        self.client
            .get(api_routes::tags::COLLECTION)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_tags(&self, names: Vec<String>) -> RepositoryResult<Vec<Tag>> {
        let request = CreateTagsRequest { tags: names };
        self.client
            .post(api_routes::tags::COLLECTION, &request)
            .await
            .map_err(|e| RepositoryError::CreateFailed(e.to_string()))
    }

    async fn create_library(
        &self,
        request: CreateLibraryRequest,
    ) -> RepositoryResult<Library> {
        self.client
            .post(api_routes::libraries::COLLECTION, &request)
            .await
            .map_err(|e| RepositoryError::CreateFailed(e.to_string()))
    }

    async fn edit_library(
        &self,
        request: EditLibraryRequest,
    ) -> RepositoryResult<Library> {
        let path = replace_param(
            api_routes::libraries::ITEM,
            "{id}",
            request.library.id.as_str(),
        );
        self.client
            .put(&path, &request)
            .await
            .map_err(|e| RepositoryError::UpdateFailed(e.to_string()))
    }

    fn base_url(&self) -> &str {
        self.client.base_url()
    }
}
