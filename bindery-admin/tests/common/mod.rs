//! Shared fixtures for the library form integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bindery_admin::domains::library::{
    FormServices, LibraryForm, LibraryFormMessage, LibraryPreview, PreviewSink,
    TagCatalog,
};
use bindery_admin::domains::ui::feedback_ui::ToastManager;
use bindery_admin::domains::ui::navigation::{Navigator, Route};
use bindery_admin::infrastructure::testing::TestApiService;
use parking_lot::Mutex;

pub const NAVIGATION_DELAY: Duration = Duration::from_millis(750);

/// Navigator that remembers every route it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// Preview consumer that keeps every update it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    previews: Mutex<Vec<LibraryPreview>>,
}

impl RecordingSink {
    pub fn previews(&self) -> Vec<LibraryPreview> {
        self.previews.lock().clone()
    }

    pub fn last(&self) -> Option<LibraryPreview> {
        self.previews.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.previews.lock().len()
    }
}

impl PreviewSink for RecordingSink {
    fn publish(&self, preview: &LibraryPreview) {
        self.previews.lock().push(preview.clone());
    }
}

pub struct Harness {
    pub api: TestApiService,
    pub toasts: ToastManager,
    pub catalog: TagCatalog,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    /// Stub server seeded with "Sample Library" and the tags Action and Drama
    pub fn new() -> Self {
        let api = TestApiService::with_sample_data();
        let catalog = TagCatalog::with_tags(api.tags());
        Self {
            api,
            toasts: ToastManager::new(),
            catalog,
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    pub fn services(&self) -> FormServices {
        FormServices::new(
            Arc::new(self.api.clone()),
            self.toasts.clone(),
            self.catalog.clone(),
            self.navigator.clone(),
        )
        .with_navigation_delay(NAVIGATION_DELAY)
    }

    pub fn create_form(&self) -> LibraryForm {
        LibraryForm::new(self.services(), self.api.libraries(), None)
    }

    pub fn edit_form(&self, name: &str) -> LibraryForm {
        let libraries = self.api.libraries();
        let editing = libraries.iter().find(|lib| lib.name == name).cloned();
        assert!(editing.is_some(), "no library named {name}");
        LibraryForm::new(self.services(), libraries, editing)
    }

    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts.history().into_iter().map(|t| t.message).collect()
    }
}

pub fn fill(form: &mut LibraryForm, name: &str, path: &str) {
    form.update(LibraryFormMessage::SetName(name.into()));
    form.update(LibraryFormMessage::SetPath(path.into()));
}
