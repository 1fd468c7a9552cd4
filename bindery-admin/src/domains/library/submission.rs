//! Create/edit submission flow
//!
//! A [`PendingSubmission`] owns everything a submission needs, so it can be
//! driven to completion without borrowing the form. The whole run happens
//! under one toast: loading first, then success or failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bindery_contracts::api::{CreateLibraryRequest, EditLibraryRequest};
use bindery_model::{Library, LibraryOptions, Tag};
use thiserror::Error;

use super::schema::{FormErrors, ValidatedLibraryForm};
use super::tags::{TagCatalog, TagPartition, removed_tags};
use crate::domains::ui::feedback_ui::{
    ToastId, ToastLevel, ToastManager, ToastMessages,
};
use crate::infrastructure::{ApiService, RepositoryError};

pub const TAG_CREATION_FAILED: &str =
    "Something went wrong when creating the tags.";

const CREATE_MESSAGES: ToastMessages<'static> = ToastMessages {
    loading: "Creating library...",
    success: "Library created!",
    error: "Something went wrong.",
};

const EDIT_MESSAGES: ToastMessages<'static> = ToastMessages {
    loading: "Updating library...",
    success: "Updates saved!",
    error: "Something went wrong.",
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("form has validation errors: {0}")]
    Invalid(FormErrors),

    #[error("a submission is already in flight")]
    InFlight,

    #[error("failed to create tags: {0}")]
    TagCreation(#[source] RepositoryError),

    #[error("failed to create library: {0}")]
    Create(#[source] RepositoryError),

    #[error("failed to update library: {0}")]
    Update(#[source] RepositoryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Create,
    Edit,
}

impl SubmissionKind {
    pub fn toast_messages(self) -> ToastMessages<'static> {
        match self {
            SubmissionKind::Create => CREATE_MESSAGES,
            SubmissionKind::Edit => EDIT_MESSAGES,
        }
    }
}

/// What a submission will send, decided when it starts
#[derive(Debug, Clone)]
pub enum SubmissionPlan {
    Create {
        form: ValidatedLibraryForm,
        tags: TagPartition,
    },
    Edit {
        original: Library,
        form: ValidatedLibraryForm,
        tags: TagPartition,
    },
}

impl SubmissionPlan {
    pub fn new(
        form: ValidatedLibraryForm,
        editing: Option<&Library>,
        catalog: &TagCatalog,
    ) -> Self {
        let tags = catalog.partition(&form.tags);
        match editing {
            Some(original) => SubmissionPlan::Edit {
                original: original.clone(),
                form,
                tags,
            },
            None => SubmissionPlan::Create { form, tags },
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionPlan::Create { .. } => SubmissionKind::Create,
            SubmissionPlan::Edit { .. } => SubmissionKind::Edit,
        }
    }

    pub fn form(&self) -> &ValidatedLibraryForm {
        match self {
            SubmissionPlan::Create { form, .. }
            | SubmissionPlan::Edit { form, .. } => form,
        }
    }

    pub fn tags(&self) -> &TagPartition {
        match self {
            SubmissionPlan::Create { tags, .. }
            | SubmissionPlan::Edit { tags, .. } => tags,
        }
    }
}

/// Payload for a new library. Options never carry an id here.
pub fn create_request(
    form: &ValidatedLibraryForm,
    tags: Vec<Tag>,
) -> CreateLibraryRequest {
    CreateLibraryRequest {
        name: form.name.clone(),
        path: form.path.clone(),
        description: form.description.clone(),
        library_options: merged_options(LibraryOptions::default(), form),
        scan_mode: Some(form.scan_mode),
        tags: Some(tags),
    }
}

/// Payload for an edit: the original library with the submitted values
/// merged in, keeping the stored option ids
pub fn edit_request(
    original: &Library,
    form: &ValidatedLibraryForm,
    tags: Vec<Tag>,
) -> EditLibraryRequest {
    let mut library = original.clone();
    library.name = form.name.clone();
    library.path = form.path.clone();
    library.description = form.description.clone();
    library.library_options =
        merged_options(original.library_options.clone(), form);
    library.tags = tags;

    EditLibraryRequest {
        library,
        removed_tags: removed_tags(&original.tags, &form.tags),
        scan_mode: Some(form.scan_mode),
    }
}

fn merged_options(
    mut options: LibraryOptions,
    form: &ValidatedLibraryForm,
) -> LibraryOptions {
    options.convert_rar_to_zip = form.convert_rar_to_zip;
    options.create_webp_thumbnails = form.create_webp_thumbnails;
    options.hard_delete_conversions = form.hard_delete_conversions;
    options.library_pattern = form.library_pattern;
    options
}

/// Submitted tags in submission order, resolved to server records
fn resolve_tags(names: &[String], known: &[Tag]) -> Vec<Tag> {
    let mut resolved: Vec<Tag> = Vec::with_capacity(names.len());
    for name in names {
        if resolved.iter().any(|tag| &tag.name == name) {
            continue;
        }
        if let Some(tag) = known.iter().find(|tag| &tag.name == name) {
            resolved.push(tag.clone());
        }
    }
    resolved
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub kind: SubmissionKind,
    pub library: Library,
    pub toast: ToastId,
}

/// Shared "submission in flight" flag for one form
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Claim the flag; `None` when a submission already holds it
    pub fn acquire(&self) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(&self.0)))
    }
}

/// Holds the in-flight flag until dropped
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A submission ready to run. The form counts as submitting until this is
/// run to completion or dropped.
pub struct PendingSubmission {
    api: Arc<dyn ApiService>,
    toasts: ToastManager,
    catalog: TagCatalog,
    plan: SubmissionPlan,
    _in_flight: InFlightGuard,
}

impl std::fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("api", &self.api.base_url())
            .field("plan", &self.plan)
            .finish()
    }
}

impl PendingSubmission {
    pub fn new(
        api: Arc<dyn ApiService>,
        toasts: ToastManager,
        catalog: TagCatalog,
        plan: SubmissionPlan,
        in_flight: InFlightGuard,
    ) -> Self {
        Self {
            api,
            toasts,
            catalog,
            plan,
            _in_flight: in_flight,
        }
    }

    pub fn plan(&self) -> &SubmissionPlan {
        &self.plan
    }

    pub async fn run(self) -> Result<SubmissionOutcome, SubmitError> {
        let kind = self.plan.kind();
        let messages = kind.toast_messages();
        let toast = self.toasts.loading(messages.loading);

        let tags = match self.create_missing_tags().await {
            Ok(tags) => tags,
            Err(e) => {
                log::error!("Failed to create tags: {}", e);
                self.toasts.resolve(toast, ToastLevel::Error, TAG_CREATION_FAILED);
                return Err(SubmitError::TagCreation(e));
            }
        };

        let result = match &self.plan {
            SubmissionPlan::Create { form, .. } => self
                .api
                .create_library(create_request(form, tags))
                .await
                .map_err(SubmitError::Create),
            SubmissionPlan::Edit { original, form, .. } => self
                .api
                .edit_library(edit_request(original, form, tags))
                .await
                .map_err(SubmitError::Update),
        };

        match result {
            Ok(library) => {
                log::info!("Saved library {} ({})", library.name, library.id);
                self.toasts.resolve(toast, ToastLevel::Success, messages.success);
                Ok(SubmissionOutcome {
                    kind,
                    library,
                    toast,
                })
            }
            Err(e) => {
                log::error!("{}", e);
                self.toasts.resolve(toast, ToastLevel::Error, messages.error);
                Err(e)
            }
        }
    }

    /// Create the tags the catalog does not know yet and return the full
    /// resolved tag set
    async fn create_missing_tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        let partition = self.plan.tags();
        let mut known = partition.existing.clone();

        if partition.needs_creation() {
            log::debug!("Creating tags {:?}", partition.to_create);
            let created = self.api.create_tags(partition.to_create.clone()).await?;
            self.catalog.merge(created.iter().cloned());
            known.extend(created);
        }

        Ok(resolve_tags(&self.plan.form().tags, &known))
    }
}
