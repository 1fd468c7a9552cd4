//! Request and response payloads exchanged with the library server.

use bindery_model::{Library, LibraryOptions, LibraryScanMode, Tag};
use serde::{Deserialize, Serialize};

/// Standard API envelope used by the REST server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }
}

/// Library creation payload
///
/// `library_options.id` is left empty; the server assigns it on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLibraryRequest {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    pub library_options: LibraryOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_mode: Option<LibraryScanMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// Library edit payload: the full merged library plus the tag diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditLibraryRequest {
    #[serde(flatten)]
    pub library: Library,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_mode: Option<LibraryScanMode>,
}

/// Tag creation payload, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTagsRequest {
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_model::LibraryPattern;

    #[test]
    fn create_request_serializes_enums_in_wire_case() {
        let request = CreateLibraryRequest {
            name: "Comics".into(),
            path: "/data/comics".into(),
            description: None,
            library_options: LibraryOptions {
                library_pattern: LibraryPattern::CollectionBased,
                ..LibraryOptions::default()
            },
            scan_mode: Some(LibraryScanMode::Batched),
            tags: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["scan_mode"], "BATCHED");
        assert_eq!(json["library_options"]["library_pattern"], "COLLECTION_BASED");
        assert!(json["library_options"].get("id").is_none());
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn edit_request_flattens_library_fields() {
        let library = Library::new("Manga", "/data/manga");
        let request = EditLibraryRequest {
            library: library.clone(),
            removed_tags: Some(vec![Tag::new("Old")]),
            scan_mode: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "Manga");
        assert_eq!(json["id"], library.id.to_string());
        assert_eq!(json["removed_tags"][0]["name"], "Old");
        assert!(json.get("scan_mode").is_none());
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::success(1u8)).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());
    }
}
