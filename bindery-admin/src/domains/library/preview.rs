//! Live preview of in-progress form edits
//!
//! The form publishes a [`LibraryPreview`] to every live subscription on each
//! value change. Subscriptions are owned by the consumer and unsubscribe when
//! dropped.

use std::sync::{Arc, Weak};

use bindery_model::{Library, LibraryOptions, LibraryPattern};
use parking_lot::Mutex;

use super::types::LibraryFormValues;

/// Projection of the form values shown by the sibling preview panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPreview {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub library_options: LibraryOptions,
    pub tags: Vec<String>,
}

impl LibraryPreview {
    /// Options from `values` are merged over `editing`'s options so the
    /// preview keeps the stored option ids.
    pub fn project(values: &LibraryFormValues, editing: Option<&Library>) -> Self {
        let mut library_options = editing
            .map(|lib| lib.library_options.clone())
            .unwrap_or_default();
        library_options.convert_rar_to_zip = values.convert_rar_to_zip;
        library_options.create_webp_thumbnails = values.create_webp_thumbnails;
        library_options.hard_delete_conversions = values.hard_delete_conversions;
        if let Ok(pattern) = values.library_pattern.parse::<LibraryPattern>() {
            library_options.library_pattern = pattern;
        }

        Self {
            name: values.name.clone(),
            path: values.path.clone(),
            description: values.description.clone(),
            library_options,
            tags: values.tag_names(),
        }
    }
}

/// Receiver for preview updates, typically the preview panel
pub trait PreviewSink: Send + Sync {
    fn publish(&self, preview: &LibraryPreview);
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    sinks: Vec<(u64, Arc<dyn PreviewSink>)>,
}

/// Fan-out point for preview updates
#[derive(Clone, Default)]
pub struct PreviewHub {
    state: Arc<Mutex<HubState>>,
}

impl std::fmt::Debug for PreviewHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHub")
            .field("subscribers", &self.len())
            .finish()
    }
}

impl PreviewHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, sink: Arc<dyn PreviewSink>) -> PreviewSubscription {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.sinks.push((id, sink));
        log::trace!("Preview subscriber {} attached", id);

        PreviewSubscription {
            id,
            hub: Arc::downgrade(&self.state),
        }
    }

    pub fn publish(&self, preview: &LibraryPreview) {
        // Snapshot so a sink may drop its own subscription while handling
        let sinks: Vec<Arc<dyn PreviewSink>> = self
            .state
            .lock()
            .sinks
            .iter()
            .map(|(_, sink)| Arc::clone(sink))
            .collect();
        for sink in sinks {
            sink.publish(preview);
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a live preview subscription
#[must_use = "dropping the subscription stops preview updates"]
#[derive(Debug)]
pub struct PreviewSubscription {
    id: u64,
    hub: Weak<Mutex<HubState>>,
}

impl PreviewSubscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    pub fn is_active(&self) -> bool {
        self.hub.upgrade().is_some_and(|state| {
            state.lock().sinks.iter().any(|(id, _)| *id == self.id)
        })
    }
}

impl Drop for PreviewSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.hub.upgrade() {
            state.lock().sinks.retain(|(id, _)| *id != self.id);
            log::trace!("Preview subscriber {} detached", self.id);
        }
    }
}
