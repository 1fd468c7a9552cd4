//! Library form types

use bindery_model::{Library, LibraryPattern, LibraryScanMode, Tag};

/// Option shown in the tag select, keyed by tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagOption {
    pub label: String,
    pub value: String,
}

impl TagOption {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            value: name,
        }
    }
}

impl From<&Tag> for TagOption {
    fn from(tag: &Tag) -> Self {
        TagOption::new(tag.name.clone())
    }
}

/// Raw form values as entered by the user.
///
/// `scan_mode` and `library_pattern` hold the select's string value so that
/// an empty selection can fall back to a default during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFormValues {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub tags: Option<Vec<TagOption>>,
    pub scan_mode: String,
    pub library_pattern: String,
    pub convert_rar_to_zip: bool,
    pub create_webp_thumbnails: bool,
    pub hard_delete_conversions: bool,
}

impl Default for LibraryFormValues {
    fn default() -> Self {
        Self::from_library(None)
    }
}

impl LibraryFormValues {
    /// Default values for a fresh form, seeded from `library` in edit mode
    pub fn from_library(library: Option<&Library>) -> Self {
        match library {
            Some(lib) => Self {
                name: lib.name.clone(),
                path: lib.path.clone(),
                description: lib.description.clone(),
                tags: Some(lib.tags.iter().map(TagOption::from).collect()),
                // Scan mode is a per-request choice, never stored on the library
                scan_mode: LibraryScanMode::default().as_str().to_string(),
                library_pattern: lib
                    .library_options
                    .library_pattern
                    .as_str()
                    .to_string(),
                convert_rar_to_zip: lib.library_options.convert_rar_to_zip,
                create_webp_thumbnails: lib
                    .library_options
                    .create_webp_thumbnails,
                hard_delete_conversions: lib
                    .library_options
                    .hard_delete_conversions,
            },
            None => Self {
                name: String::new(),
                path: String::new(),
                description: None,
                tags: None,
                scan_mode: LibraryScanMode::default().as_str().to_string(),
                library_pattern: LibraryPattern::default().as_str().to_string(),
                convert_rar_to_zip: false,
                create_webp_thumbnails: false,
                hard_delete_conversions: false,
            },
        }
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .flatten()
            .map(|tag| tag.value.clone())
            .collect()
    }
}
