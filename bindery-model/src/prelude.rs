//! Client focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in bindery-admin or other presentation layers.

pub use super::error::ModelError;
pub use super::ids::{LibraryId, LibraryOptionsId, TagId};
pub use super::library::{
    Library, LibraryLike, LibraryOptions, LibraryPattern, LibraryScanMode,
};
pub use super::tag::Tag;
