use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bindery_contracts::api::{CreateLibraryRequest, EditLibraryRequest};
use bindery_model::chrono::Utc;
use bindery_model::{
    Library, LibraryId, LibraryOptionsId, LibraryPattern, Tag,
};
use parking_lot::RwLock;

use crate::infrastructure::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::services::api::ApiService;

/// In-memory library server used by tests and the binary's offline mode
#[derive(Debug, Clone)]
pub struct TestApiService {
    inner: Arc<RwLock<InnerApiState>>,
    base_url: Arc<str>,
}

#[derive(Debug, Clone, Default)]
struct InnerApiState {
    libraries: Vec<Library>,
    tags: Vec<Tag>,
    create_requests: Vec<CreateLibraryRequest>,
    edit_requests: Vec<EditLibraryRequest>,
    tag_requests: Vec<Vec<String>>,
    fail_library_mutations: bool,
    fail_tag_creation: bool,
    latency: Option<Duration>,
}

impl Default for TestApiService {
    fn default() -> Self {
        Self::new("memory://bindery")
    }
}

impl TestApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(InnerApiState::default())),
            base_url: Arc::from(base_url.into()),
        }
    }

    /// Seeded with a sample library and a couple of tags
    pub fn with_sample_data() -> Self {
        let service = Self::default();
        let action = Tag::new("Action");
        let drama = Tag::new("Drama");
        service.push_tag(action.clone());
        service.push_tag(drama);
        service.push_library(sample_library("Sample Library", "/data/sample", vec![action]));
        service
    }

    pub fn push_library(&self, library: Library) {
        self.inner.write().libraries.push(library);
    }

    pub fn push_tag(&self, tag: Tag) {
        self.inner.write().tags.push(tag);
    }

    pub fn set_fail_library_mutations(&self, value: bool) {
        self.inner.write().fail_library_mutations = value;
    }

    pub fn set_fail_tag_creation(&self, value: bool) {
        self.inner.write().fail_tag_creation = value;
    }

    /// Delay every mutation by `latency` (tokio time, so paused clocks apply)
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.inner.write().latency = latency;
    }

    pub fn libraries(&self) -> Vec<Library> {
        self.inner.read().libraries.clone()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.inner.read().tags.clone()
    }

    pub fn create_requests(&self) -> Vec<CreateLibraryRequest> {
        self.inner.read().create_requests.clone()
    }

    pub fn edit_requests(&self) -> Vec<EditLibraryRequest> {
        self.inner.read().edit_requests.clone()
    }

    pub fn tag_requests(&self) -> Vec<Vec<String>> {
        self.inner.read().tag_requests.clone()
    }

    async fn simulate_latency(&self) {
        let latency = self.inner.read().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ApiService for TestApiService {
    async fn fetch_libraries(&self) -> RepositoryResult<Vec<Library>> {
        Ok(self.libraries())
    }

    async fn fetch_tags(&self) -> RepositoryResult<Vec<Tag>> {
        Ok(self.tags())
    }

    async fn create_tags(&self, names: Vec<String>) -> RepositoryResult<Vec<Tag>> {
        self.simulate_latency().await;

        let mut guard = self.inner.write();
        guard.tag_requests.push(names.clone());
        if guard.fail_tag_creation {
            return Err(RepositoryError::CreateFailed(
                "tag creation disabled".into(),
            ));
        }

        let mut created = Vec::with_capacity(names.len());
        for name in names {
            if guard.tags.iter().any(|tag| tag.name == name) {
                return Err(RepositoryError::Conflict(format!(
                    "tag {name} already exists"
                )));
            }
            let tag = Tag::new(name);
            guard.tags.push(tag.clone());
            created.push(tag);
        }
        Ok(created)
    }

    async fn create_library(
        &self,
        request: CreateLibraryRequest,
    ) -> RepositoryResult<Library> {
        self.simulate_latency().await;

        let mut guard = self.inner.write();
        guard.create_requests.push(request.clone());
        if guard.fail_library_mutations {
            return Err(RepositoryError::CreateFailed(
                "library creation disabled".into(),
            ));
        }
        if guard.libraries.iter().any(|lib| lib.name == request.name) {
            return Err(RepositoryError::Conflict(format!(
                "library {} already exists",
                request.name
            )));
        }

        let id = LibraryId::new();
        let mut library_options = request.library_options;
        library_options.id = Some(LibraryOptionsId::new());
        library_options.library_id = Some(id);

        let library = Library {
            id,
            name: request.name,
            path: request.path,
            description: request.description,
            tags: request.tags.unwrap_or_default(),
            library_options,
            updated_at: Some(Utc::now()),
        };
        guard.libraries.push(library.clone());
        Ok(library)
    }

    async fn edit_library(
        &self,
        request: EditLibraryRequest,
    ) -> RepositoryResult<Library> {
        self.simulate_latency().await;

        let mut guard = self.inner.write();
        guard.edit_requests.push(request.clone());
        if guard.fail_library_mutations {
            return Err(RepositoryError::UpdateFailed(
                "library edits disabled".into(),
            ));
        }

        let EditLibraryRequest {
            mut library,
            removed_tags,
            ..
        } = request;
        if let Some(removed) = removed_tags {
            library
                .tags
                .retain(|tag| !removed.iter().any(|r| r.name == tag.name));
        }
        library.updated_at = Some(Utc::now());

        match guard.libraries.iter_mut().find(|lib| lib.id == library.id) {
            Some(existing) => {
                *existing = library.clone();
                Ok(library)
            }
            None => Err(RepositoryError::NotFound {
                entity_type: "Library".into(),
                id: library.id.to_string(),
            }),
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub fn sample_library(name: &str, path: &str, tags: Vec<Tag>) -> Library {
    let mut library = Library::new(name, path).with_tags(tags);
    library.library_options.library_pattern = LibraryPattern::SeriesBased;
    library
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_tags_rejects_duplicates() {
        let api = TestApiService::with_sample_data();
        let err = api.create_tags(vec!["Action".into()]).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let created = api.create_tags(vec!["Horror".into()]).await.unwrap();
        assert_eq!(created[0].name, "Horror");
        assert_eq!(api.tags().len(), 3);
    }

    #[tokio::test]
    async fn edit_unknown_library_is_not_found() {
        let api = TestApiService::default();
        let request = EditLibraryRequest {
            library: Library::new("Ghost", "/nowhere"),
            removed_tags: None,
            scan_mode: None,
        };
        assert!(matches!(
            api.edit_library(request).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }
}
