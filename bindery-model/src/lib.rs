//! Core data model definitions shared across Bindery crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod error;
pub mod ids;
pub mod library;
pub mod prelude;
pub mod tag;

pub use error::{ModelError, Result as ModelResult};
pub use ids::{LibraryId, LibraryOptionsId, TagId};
pub use library::{
    Library, LibraryLike, LibraryOptions, LibraryPattern, LibraryScanMode,
};
pub use tag::Tag;
