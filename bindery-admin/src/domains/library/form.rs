//! Library create/edit form controller
//!
//! The form is owned by a single task and driven through [`Message`]s.
//! Submitting splits into [`LibraryForm::begin_submit`], which hands out a
//! [`PendingSubmission`] that can run without borrowing the form, and
//! [`LibraryForm::finish_submit`], which applies the outcome.

use std::sync::Arc;
use std::time::Duration;

use bindery_model::Library;
use tokio_util::sync::CancellationToken;

use super::messages::Message;
use super::preview::{LibraryPreview, PreviewHub, PreviewSink, PreviewSubscription};
use super::schema::{FieldError, FormErrors, FormField, LibraryFormSchema};
use super::submission::{
    InFlight, PendingSubmission, SubmissionOutcome, SubmissionPlan, SubmitError,
};
use super::tags::{self, TagCatalog};
use super::types::{LibraryFormValues, TagOption};
use crate::domains::ui::feedback_ui::ToastManager;
use crate::domains::ui::navigation::{
    Navigator, PendingNavigation, Route, navigate_after_toast,
};
use crate::infrastructure::ApiService;

pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(750);

/// Collaborators shared by every form instance
#[derive(Clone)]
pub struct FormServices {
    pub api: Arc<dyn ApiService>,
    pub toasts: ToastManager,
    pub catalog: TagCatalog,
    pub navigator: Arc<dyn Navigator>,
    pub navigation_delay: Duration,
}

impl std::fmt::Debug for FormServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormServices")
            .field("api", &self.api)
            .field("catalog", &self.catalog.len())
            .field("navigation_delay", &self.navigation_delay)
            .finish_non_exhaustive()
    }
}

impl FormServices {
    pub fn new(
        api: Arc<dyn ApiService>,
        toasts: ToastManager,
        catalog: TagCatalog,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            toasts,
            catalog,
            navigator,
            navigation_delay: DEFAULT_NAVIGATION_DELAY,
        }
    }

    pub fn with_navigation_delay(mut self, delay: Duration) -> Self {
        self.navigation_delay = delay;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPicker {
    pub is_open: bool,
    pub starting_path: String,
}

/// Work the caller has to drive after [`LibraryForm::update`]
#[derive(Debug)]
pub enum FormEffect {
    Submit(PendingSubmission),
    CreateTag(String),
}

#[derive(Debug)]
pub struct LibraryForm {
    services: FormServices,
    existing: Vec<Library>,
    editing: Option<Library>,
    schema: LibraryFormSchema,
    values: LibraryFormValues,
    errors: FormErrors,
    submitted_once: bool,
    in_flight: InFlight,
    picker: DirectoryPicker,
    preview: PreviewHub,
    lifetime: CancellationToken,
    navigation: Option<PendingNavigation>,
}

impl LibraryForm {
    /// Create form when `editing` is `None`, edit form otherwise
    pub fn new(
        services: FormServices,
        existing: Vec<Library>,
        editing: Option<Library>,
    ) -> Self {
        let schema = LibraryFormSchema::new(&existing, editing.as_ref());
        let values = LibraryFormValues::from_library(editing.as_ref());
        Self {
            services,
            existing,
            editing,
            schema,
            values,
            errors: FormErrors::default(),
            submitted_once: false,
            in_flight: InFlight::new(),
            picker: DirectoryPicker::default(),
            preview: PreviewHub::new(),
            lifetime: CancellationToken::new(),
            navigation: None,
        }
    }

    pub fn values(&self) -> &LibraryFormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn editing(&self) -> Option<&Library> {
        self.editing.as_ref()
    }

    pub fn is_creating(&self) -> bool {
        self.editing.is_none()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_set()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_creating() {
            "Create Library"
        } else {
            "Edit Library"
        }
    }

    pub fn picker(&self) -> &DirectoryPicker {
        &self.picker
    }

    pub fn tag_catalog(&self) -> &TagCatalog {
        &self.services.catalog
    }

    pub fn tag_options(&self) -> Vec<TagOption> {
        self.services.catalog.options()
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.services.toasts
    }

    pub fn preview(&self) -> LibraryPreview {
        LibraryPreview::project(&self.values, self.editing.as_ref())
    }

    /// Attach a preview consumer. It receives the current preview right away
    /// and every later change until the subscription is dropped.
    pub fn subscribe_preview(
        &self,
        sink: Arc<dyn PreviewSink>,
    ) -> PreviewSubscription {
        sink.publish(&self.preview());
        self.preview.subscribe(sink)
    }

    pub fn update(&mut self, message: Message) -> Option<FormEffect> {
        log::trace!("{}", message.name());

        match message {
            Message::SetName(name) => self.edit(|v| v.name = name),
            Message::SetPath(path) => self.edit(|v| v.path = path),
            Message::SetDescription(description) => self.edit(|v| {
                v.description = (!description.is_empty()).then_some(description)
            }),
            Message::SetTags(tags) => {
                self.edit(|v| v.tags = (!tags.is_empty()).then_some(tags))
            }
            Message::SetScanMode(mode) => self.edit(|v| v.scan_mode = mode),
            Message::SetLibraryPattern(pattern) => {
                self.edit(|v| v.library_pattern = pattern)
            }
            Message::SetConvertRarToZip(value) => {
                self.edit(|v| v.convert_rar_to_zip = value)
            }
            Message::SetCreateWebpThumbnails(value) => {
                self.edit(|v| v.create_webp_thumbnails = value)
            }
            Message::SetHardDeleteConversions(value) => {
                self.edit(|v| v.hard_delete_conversions = value)
            }
            Message::BrowseForPath => {
                self.picker = DirectoryPicker {
                    is_open: true,
                    starting_path: self.values.path.clone(),
                };
            }
            Message::PathSelected(selection) => {
                self.picker.is_open = false;
                if let Some(path) = selection.filter(|p| !p.is_empty()) {
                    self.edit(|v| v.path = path);
                }
            }
            Message::CreateTag(name) => {
                return Some(FormEffect::CreateTag(name));
            }
            Message::Submit => match self.begin_submit() {
                Ok(pending) => return Some(FormEffect::Submit(pending)),
                Err(SubmitError::Invalid(errors)) => {
                    log::debug!("Library form is invalid: {}", errors);
                }
                Err(e) => log::warn!("Submit ignored: {}", e),
            },
            Message::Reset => self.reset(),
        }
        None
    }

    fn edit(&mut self, apply: impl FnOnce(&mut LibraryFormValues)) {
        apply(&mut self.values);
        if self.submitted_once {
            self.revalidate();
        }
        self.publish_preview();
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.values).err().unwrap_or_default();
    }

    fn publish_preview(&self) {
        if !self.preview.is_empty() {
            self.preview.publish(&self.preview());
        }
    }

    /// Back to the default values for the current mode
    pub fn reset(&mut self) {
        self.values = LibraryFormValues::from_library(self.editing.as_ref());
        self.errors.clear();
        self.submitted_once = false;
        self.picker = DirectoryPicker::default();
        self.publish_preview();
    }

    /// Validate and, when valid, hand out the submission to run
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.in_flight.is_set() {
            return Err(SubmitError::InFlight);
        }

        self.submitted_once = true;
        let form = match self.schema.validate(&self.values) {
            Ok(form) => form,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors.clear();
        let guard = self.in_flight.acquire().ok_or(SubmitError::InFlight)?;

        let plan =
            SubmissionPlan::new(form, self.editing.as_ref(), &self.services.catalog);
        Ok(PendingSubmission::new(
            Arc::clone(&self.services.api),
            self.services.toasts.clone(),
            self.services.catalog.clone(),
            plan,
            guard,
        ))
    }

    /// Apply a finished submission. On success the form resets and
    /// navigation home is scheduled.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmissionOutcome, SubmitError>,
    ) -> Result<Library, SubmitError> {
        let outcome = result?;
        let library = outcome.library;

        match self.existing.iter_mut().find(|lib| lib.id == library.id) {
            Some(existing) => *existing = library.clone(),
            None => self.existing.push(library.clone()),
        }
        if self.editing.is_some() {
            self.editing = Some(library.clone());
        }
        self.schema = LibraryFormSchema::new(&self.existing, self.editing.as_ref());
        self.reset();

        if let Some(previous) = self.navigation.take() {
            previous.cancel();
        }
        self.navigation = navigate_after_toast(
            Arc::clone(&self.services.navigator),
            &self.services.toasts,
            outcome.toast,
            self.services.navigation_delay,
            self.lifetime.child_token(),
            Route::Home,
        );

        Ok(library)
    }

    /// Validate, run and apply a submission in one go
    pub async fn submit(&mut self) -> Result<Library, SubmitError> {
        let pending = self.begin_submit()?;
        let result = pending.run().await;
        self.finish_submit(result)
    }

    /// Create a tag typed into the tag select
    pub async fn create_tag(&self, name: &str) -> bool {
        tags::handle_create_tag(
            self.services.api.as_ref(),
            &self.services.catalog,
            name,
        )
        .await
        .is_some()
    }

    /// Navigation scheduled by the last successful submit, if any
    pub fn take_pending_navigation(&mut self) -> Option<PendingNavigation> {
        self.navigation.take()
    }

    pub fn has_pending_navigation(&self) -> bool {
        self.navigation.as_ref().is_some_and(|nav| !nav.is_finished())
    }

    /// Tear the form down, cancelling any scheduled navigation
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for LibraryForm {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ui::navigation::MockNavigator;
    use crate::infrastructure::testing::TestApiService;

    fn services(api: &TestApiService) -> FormServices {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().return_const(());
        FormServices::new(
            Arc::new(api.clone()),
            ToastManager::new(),
            TagCatalog::with_tags(api.tags()),
            Arc::new(navigator),
        )
    }

    #[test]
    fn labels_follow_mode() {
        let api = TestApiService::with_sample_data();
        let libraries = api.libraries();

        let create = LibraryForm::new(services(&api), libraries.clone(), None);
        assert_eq!(create.submit_label(), "Create Library");

        let edit =
            LibraryForm::new(services(&api), libraries.clone(), libraries.first().cloned());
        assert_eq!(edit.submit_label(), "Edit Library");
        assert_eq!(edit.values().name, "Sample Library");
    }

    #[test]
    fn errors_appear_on_submit_then_track_changes() {
        let api = TestApiService::with_sample_data();
        let mut form = LibraryForm::new(services(&api), api.libraries(), None);

        form.update(Message::SetName("Sample Library".into()));
        assert!(form.errors().is_empty(), "no errors before first submit");

        assert!(form.update(Message::Submit).is_none());
        assert_eq!(
            form.error(FormField::Name),
            Some(&FieldError::NameTaken("Sample Library".into()))
        );
        assert_eq!(form.error(FormField::Path), Some(&FieldError::PathRequired));

        form.update(Message::SetName("Fresh".into()));
        assert!(form.error(FormField::Name).is_none());
        assert!(form.error(FormField::Path).is_some());
    }

    #[test]
    fn picker_selection_sets_path() {
        let api = TestApiService::default();
        let mut form = LibraryForm::new(services(&api), vec![], None);
        form.update(Message::SetPath("/srv".into()));

        form.update(Message::BrowseForPath);
        assert!(form.picker().is_open);
        assert_eq!(form.picker().starting_path, "/srv");

        form.update(Message::PathSelected(Some(String::new())));
        assert!(!form.picker().is_open);
        assert_eq!(form.values().path, "/srv");

        form.update(Message::BrowseForPath);
        form.update(Message::PathSelected(Some("/srv/comics".into())));
        assert_eq!(form.values().path, "/srv/comics");
    }

    #[test]
    fn second_submit_is_rejected_while_in_flight() {
        let api = TestApiService::default();
        let mut form = LibraryForm::new(services(&api), vec![], None);
        form.update(Message::SetName("Comics".into()));
        form.update(Message::SetPath("/srv/comics".into()));

        let pending = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit().unwrap_err(), SubmitError::InFlight);

        drop(pending);
        assert!(!form.is_submitting());
        assert!(form.begin_submit().is_ok());
    }
}
