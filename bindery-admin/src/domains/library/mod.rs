//! Library create/edit form domain

pub mod form;
pub mod messages;
pub mod preview;
pub mod schema;
pub mod submission;
pub mod tags;
pub mod types;

pub use form::{DirectoryPicker, FormEffect, FormServices, LibraryForm};
pub use messages::Message as LibraryFormMessage;
pub use preview::{LibraryPreview, PreviewHub, PreviewSink, PreviewSubscription};
pub use schema::{
    FieldError, FormErrors, FormField, LibraryFormSchema, ValidatedLibraryForm,
};
pub use submission::{
    InFlight, InFlightGuard, PendingSubmission, SubmissionKind, SubmissionOutcome, SubmissionPlan,
    SubmitError,
};
pub use tags::{
    TagCatalog, TagPartition, handle_create_tag, load_tags, partition_tags,
    removed_tags,
};
pub use types::{LibraryFormValues, TagOption};
