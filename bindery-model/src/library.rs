use std::str::FromStr;

use crate::chrono::{DateTime, Utc};
use crate::error::ModelError;
use crate::tag::Tag;

use super::ids::{LibraryId, LibraryOptionsId};

/// Read-only operations for library-like types
pub trait LibraryLike {
    fn get_id(&self) -> LibraryId;
    fn get_name(&self) -> &str;
    fn get_path(&self) -> &str;
    fn get_tags(&self) -> &[Tag];
}

/// A watched directory together with its scan and conversion options
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
    pub path: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    pub library_options: LibraryOptions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Library {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let id = LibraryId::new();
        Self {
            id,
            name: name.into(),
            path: path.into(),
            description: None,
            tags: Vec::new(),
            library_options: LibraryOptions {
                id: Some(LibraryOptionsId::new()),
                library_id: Some(id),
                ..LibraryOptions::default()
            },
            updated_at: Some(Utc::now()),
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

impl LibraryLike for Library {
    fn get_id(&self) -> LibraryId {
        self.id
    }

    fn get_name(&self) -> &str {
        &self.name
    }

    fn get_path(&self) -> &str {
        &self.path
    }

    fn get_tags(&self) -> &[Tag] {
        &self.tags
    }
}

/// Conversion and classification behaviour applied when a library is scanned
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LibraryOptions {
    /// Absent until the server has persisted the record
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<LibraryOptionsId>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub library_id: Option<LibraryId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub convert_rar_to_zip: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hard_delete_conversions: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub create_webp_thumbnails: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub library_pattern: LibraryPattern,
}

/// How books inside a library directory are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LibraryPattern {
    /// Each directory directly under the library root is a series
    #[default]
    SeriesBased,
    /// Each top-level directory is a collection, flattened recursively
    CollectionBased,
}

impl LibraryPattern {
    pub const ALL: [LibraryPattern; 2] =
        [LibraryPattern::SeriesBased, LibraryPattern::CollectionBased];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryPattern::SeriesBased => "SERIES_BASED",
            LibraryPattern::CollectionBased => "COLLECTION_BASED",
        }
    }
}

impl std::fmt::Display for LibraryPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryPattern {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SERIES_BASED" => Ok(LibraryPattern::SeriesBased),
            "COLLECTION_BASED" => Ok(LibraryPattern::CollectionBased),
            other => Err(ModelError::InvalidPattern(other.to_string())),
        }
    }
}

/// How the server walks the library directory once it is created or updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LibraryScanMode {
    Sync,
    #[default]
    Batched,
    None,
}

impl LibraryScanMode {
    pub const ALL: [LibraryScanMode; 3] = [
        LibraryScanMode::Sync,
        LibraryScanMode::Batched,
        LibraryScanMode::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryScanMode::Sync => "SYNC",
            LibraryScanMode::Batched => "BATCHED",
            LibraryScanMode::None => "NONE",
        }
    }
}

impl std::fmt::Display for LibraryScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryScanMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SYNC" => Ok(LibraryScanMode::Sync),
            "BATCHED" => Ok(LibraryScanMode::Batched),
            "NONE" => Ok(LibraryScanMode::None),
            other => Err(ModelError::InvalidScanMode(other.to_string())),
        }
    }
}
