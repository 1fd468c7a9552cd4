//! Tag catalog and tag bookkeeping for the library form

use std::collections::HashSet;
use std::sync::Arc;

use bindery_model::Tag;
use parking_lot::RwLock;

use super::types::TagOption;
use crate::infrastructure::{ApiService, RepositoryResult};

#[derive(Debug, Default)]
struct CatalogState {
    tags: Vec<Tag>,
    is_loading: bool,
}

/// Shared view of every tag known to the server
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    inner: Arc<RwLock<CatalogState>>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(tags: Vec<Tag>) -> Self {
        let catalog = Self::new();
        catalog.replace(tags);
        catalog
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.inner.read().tags.clone()
    }

    /// Options for the tag select
    pub fn options(&self) -> Vec<TagOption> {
        self.inner.read().tags.iter().map(TagOption::from).collect()
    }

    pub fn find(&self, name: &str) -> Option<Tag> {
        self.inner
            .read()
            .tags
            .iter()
            .find(|tag| tag.name == name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().tags.iter().any(|tag| tag.name == name)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().is_loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.write().is_loading = loading;
    }

    pub fn replace(&self, tags: Vec<Tag>) {
        self.inner.write().tags = tags;
    }

    /// Add `tags`, skipping names already present
    pub fn merge(&self, tags: impl IntoIterator<Item = Tag>) {
        let mut state = self.inner.write();
        for tag in tags {
            if !state.tags.iter().any(|existing| existing.name == tag.name) {
                state.tags.push(tag);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split submitted tag names against the catalog
    pub fn partition(&self, names: &[String]) -> TagPartition {
        partition_tags(&self.inner.read().tags, names)
    }
}

/// Submitted tags split into those the server already has and those that
/// must be created first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPartition {
    pub existing: Vec<Tag>,
    pub to_create: Vec<String>,
}

impl TagPartition {
    pub fn needs_creation(&self) -> bool {
        !self.to_create.is_empty()
    }
}

pub fn partition_tags(catalog: &[Tag], names: &[String]) -> TagPartition {
    let mut seen = HashSet::new();
    let mut partition = TagPartition::default();
    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }
        match catalog.iter().find(|tag| &tag.name == name) {
            Some(tag) => partition.existing.push(tag.clone()),
            None => partition.to_create.push(name.clone()),
        }
    }
    partition
}

/// Tags on `original` that are absent from `submitted`, or `None` when
/// nothing was removed
pub fn removed_tags(original: &[Tag], submitted: &[String]) -> Option<Vec<Tag>> {
    let removed: Vec<Tag> = original
        .iter()
        .filter(|tag| !submitted.iter().any(|name| *name == tag.name))
        .cloned()
        .collect();
    (!removed.is_empty()).then_some(removed)
}

/// Refresh the catalog from the server
pub async fn load_tags(
    api: &dyn ApiService,
    catalog: &TagCatalog,
) -> RepositoryResult<usize> {
    catalog.set_loading(true);
    let result = api.fetch_tags().await;
    catalog.set_loading(false);

    let tags = result?;
    let count = tags.len();
    catalog.replace(tags);
    log::debug!("Loaded {} tags", count);
    Ok(count)
}

/// Create a tag the user typed into the tag select.
///
/// Failures are logged and otherwise ignored; the submission flow creates
/// any tag still missing at submit time.
pub async fn handle_create_tag(
    api: &dyn ApiService,
    catalog: &TagCatalog,
    name: &str,
) -> Option<Vec<Tag>> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    match api.create_tags(vec![name.to_string()]).await {
        Ok(created) => {
            log::info!("Created tag {}", name);
            catalog.merge(created.iter().cloned());
            Some(created)
        }
        Err(e) => {
            log::error!("Failed to create tag {}: {}", name, e);
            None
        }
    }
}
