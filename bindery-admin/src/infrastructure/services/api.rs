//! API service trait
//!
//! Abstraction over the library server's REST surface so the form domain can
//! run against the HTTP client or an in-memory stub.

use async_trait::async_trait;
use bindery_contracts::api::{CreateLibraryRequest, EditLibraryRequest};
use bindery_model::{Library, Tag};

use crate::infrastructure::repository::RepositoryResult;

#[async_trait]
pub trait ApiService: Send + Sync + std::fmt::Debug {
    /// Fetch all libraries from the server
    async fn fetch_libraries(&self) -> RepositoryResult<Vec<Library>>;

    /// Fetch every tag known to the server
    async fn fetch_tags(&self) -> RepositoryResult<Vec<Tag>>;

    /// Create tags by name, returning the created records
    async fn create_tags(&self, names: Vec<String>) -> RepositoryResult<Vec<Tag>>;

    /// Create a library
    async fn create_library(
        &self,
        request: CreateLibraryRequest,
    ) -> RepositoryResult<Library>;

    /// Replace an existing library with the merged form values
    async fn edit_library(
        &self,
        request: EditLibraryRequest,
    ) -> RepositoryResult<Library>;

    /// Get the base URL
    fn base_url(&self) -> &str;
}
