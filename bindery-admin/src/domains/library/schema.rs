//! Validation schema for the library form
//!
//! The schema is built from the libraries that already exist on the server
//! and, in edit mode, the library being edited. The uniqueness and
//! parent-path rules skip that library by id, and a name or path equal to
//! its stored value always passes, so re-saving it unchanged never collides.
//! These are pre-checks only; the server still validates.

use std::collections::BTreeMap;
use std::fmt;

use bindery_model::{LibraryId, LibraryLike, LibraryPattern, LibraryScanMode};
use thiserror::Error;

use super::types::LibraryFormValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Path,
    Description,
    Tags,
    ScanMode,
    LibraryPattern,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Path,
        FormField::Description,
        FormField::Tags,
        FormField::ScanMode,
        FormField::LibraryPattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Path => "path",
            FormField::Description => "description",
            FormField::Tags => "tags",
            FormField::ScanMode => "scan_mode",
            FormField::LibraryPattern => "library_pattern",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Library name is required")]
    NameRequired,
    #[error("You already have a library named {0}.")]
    NameTaken(String),
    #[error("Library path is required")]
    PathRequired,
    #[error("Invalid library, parent directory already exists as library.")]
    ParentPathExists,
    #[error("Invalid scan mode: {0}")]
    InvalidScanMode(String),
    #[error("Invalid library pattern: {0}")]
    InvalidPattern(String),
}

/// Field-scoped validation errors, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: FormField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Message rendered inline under the field
    pub fn message(&self, field: FormField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Form values that passed validation, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLibraryForm {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub scan_mode: LibraryScanMode,
    pub library_pattern: LibraryPattern,
    pub convert_rar_to_zip: bool,
    pub create_webp_thumbnails: bool,
    pub hard_delete_conversions: bool,
}

#[derive(Debug, Clone)]
struct ExistingLibrary {
    id: LibraryId,
    name: String,
    path: String,
}

impl ExistingLibrary {
    fn from_library<L: LibraryLike>(library: &L) -> Self {
        Self {
            id: library.get_id(),
            name: library.get_name().to_string(),
            path: library.get_path().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LibraryFormSchema {
    existing: Vec<ExistingLibrary>,
    editing: Option<ExistingLibrary>,
}

impl LibraryFormSchema {
    pub fn new<L: LibraryLike>(
        existing_libraries: &[L],
        editing: Option<&L>,
    ) -> Self {
        let existing = existing_libraries
            .iter()
            .map(ExistingLibrary::from_library)
            .collect();
        Self {
            existing,
            editing: editing.map(ExistingLibrary::from_library),
        }
    }

    pub fn editing(&self) -> Option<LibraryId> {
        self.editing.as_ref().map(|library| library.id)
    }

    fn others(&self) -> impl Iterator<Item = &ExistingLibrary> {
        let editing = self.editing();
        self.existing
            .iter()
            .filter(move |library| Some(library.id) != editing)
    }

    pub fn is_name_taken(&self, name: &str) -> bool {
        if self.editing.as_ref().is_some_and(|own| own.name == name) {
            return false;
        }
        self.others().any(|library| library.name == name)
    }

    /// True when `path` is a prefix of another library's path. The edited
    /// library's own stored path never counts, even when a child library
    /// was added under it later.
    pub fn is_parent_of_existing(&self, path: &str) -> bool {
        if self.editing.as_ref().is_some_and(|own| own.path == path) {
            return false;
        }
        self.others().any(|library| library.path.starts_with(path))
    }

    /// Validate one field in isolation.
    ///
    /// Name and path are trimmed before the required, unique and prefix
    /// checks, so whitespace-only input counts as empty. This is deliberate:
    /// the trimmed value is also what gets submitted.
    pub fn validate_field(
        &self,
        field: FormField,
        values: &LibraryFormValues,
    ) -> Option<FieldError> {
        match field {
            FormField::Name => {
                let name = values.name.trim();
                if name.is_empty() {
                    Some(FieldError::NameRequired)
                } else if self.is_name_taken(name) {
                    Some(FieldError::NameTaken(name.to_string()))
                } else {
                    None
                }
            }
            FormField::Path => {
                let path = values.path.trim();
                if path.is_empty() {
                    Some(FieldError::PathRequired)
                } else if self.is_parent_of_existing(path) {
                    Some(FieldError::ParentPathExists)
                } else {
                    None
                }
            }
            FormField::ScanMode => parse_scan_mode(&values.scan_mode).err(),
            FormField::LibraryPattern => {
                parse_pattern(&values.library_pattern).err()
            }
            FormField::Description | FormField::Tags => None,
        }
    }

    /// Validate every field, collecting all failures
    pub fn validate(
        &self,
        values: &LibraryFormValues,
    ) -> Result<ValidatedLibraryForm, FormErrors> {
        let mut errors = FormErrors::new();
        for field in FormField::ALL {
            if let Some(error) = self.validate_field(field, values) {
                errors.insert(field, error);
            }
        }

        let (Ok(scan_mode), Ok(library_pattern)) = (
            parse_scan_mode(&values.scan_mode),
            parse_pattern(&values.library_pattern),
        ) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedLibraryForm {
            name: values.name.trim().to_string(),
            path: values.path.trim().to_string(),
            description: values.description.clone(),
            tags: values.tag_names(),
            scan_mode,
            library_pattern,
            convert_rar_to_zip: values.convert_rar_to_zip,
            create_webp_thumbnails: values.create_webp_thumbnails,
            hard_delete_conversions: values.hard_delete_conversions,
        })
    }
}

fn parse_scan_mode(value: &str) -> Result<LibraryScanMode, FieldError> {
    if value.is_empty() {
        return Ok(LibraryScanMode::default());
    }
    value
        .parse()
        .map_err(|_| FieldError::InvalidScanMode(value.to_string()))
}

fn parse_pattern(value: &str) -> Result<LibraryPattern, FieldError> {
    if value.is_empty() {
        return Ok(LibraryPattern::default());
    }
    value
        .parse()
        .map_err(|_| FieldError::InvalidPattern(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_model::Library;

    fn libraries() -> Vec<Library> {
        vec![
            Library::new("Comics", "/data/comics"),
            Library::new("Manga", "/data/manga/jp"),
        ]
    }

    fn values(name: &str, path: &str) -> LibraryFormValues {
        LibraryFormValues {
            name: name.into(),
            path: path.into(),
            ..LibraryFormValues::default()
        }
    }

    #[test]
    fn empty_name_and_path_are_required() {
        let schema = LibraryFormSchema::new(&libraries(), None);
        let errors = schema.validate(&values("", "  ")).unwrap_err();

        assert_eq!(errors.get(FormField::Name), Some(&FieldError::NameRequired));
        assert_eq!(
            errors.message(FormField::Path).as_deref(),
            Some("Library path is required")
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn duplicate_name_is_rejected_with_the_name() {
        let schema = LibraryFormSchema::new(&libraries(), None);
        let errors = schema.validate(&values("Comics", "/data/new")).unwrap_err();
        assert_eq!(
            errors.message(FormField::Name).as_deref(),
            Some("You already have a library named Comics.")
        );
    }

    #[test]
    fn parent_of_existing_path_is_rejected() {
        let schema = LibraryFormSchema::new(&libraries(), None);

        for candidate in ["/data", "/data/manga", "/data/comics"] {
            let errors = schema.validate(&values("New", candidate)).unwrap_err();
            assert_eq!(
                errors.get(FormField::Path),
                Some(&FieldError::ParentPathExists),
                "{candidate} should collide"
            );
        }

        assert!(schema.validate(&values("New", "/data/books")).is_ok());
    }

    #[test]
    fn edited_library_does_not_collide_with_itself() {
        let existing = libraries();
        let schema = LibraryFormSchema::new(&existing, Some(&existing[0]));

        let validated = schema
            .validate(&values("Comics", "/data/comics"))
            .expect("own name and path are allowed");
        assert_eq!(validated.name, "Comics");

        // Other libraries still count
        let errors = schema.validate(&values("Manga", "/data/manga")).unwrap_err();
        assert!(errors.get(FormField::Name).is_some());
        assert!(errors.get(FormField::Path).is_some());
    }

    #[test]
    fn unchanged_parent_can_be_resaved_over_its_child() {
        let mut existing = libraries();
        existing.push(Library::new("Comics Annuals", "/data/comics/annuals"));
        let schema = LibraryFormSchema::new(&existing, Some(&existing[0]));

        assert!(schema.validate(&values("Comics", "/data/comics")).is_ok());
        assert!(schema.validate(&values(" Comics ", "/data/comics ")).is_ok());

        // A shorter path still covers the child
        let errors = schema.validate(&values("Comics", "/data/com")).unwrap_err();
        assert_eq!(errors.get(FormField::Path), Some(&FieldError::ParentPathExists));
    }

    #[test]
    fn empty_enums_fall_back_to_defaults() {
        let schema = LibraryFormSchema::new(&libraries(), None);
        let mut input = values("New", "/srv/new");
        input.scan_mode.clear();
        input.library_pattern.clear();

        let validated = schema.validate(&input).unwrap();
        assert_eq!(validated.scan_mode, LibraryScanMode::Batched);
        assert_eq!(validated.library_pattern, LibraryPattern::SeriesBased);
    }

    #[test]
    fn unknown_enum_values_are_field_errors() {
        let schema = LibraryFormSchema::new(&libraries(), None);
        let mut input = values("New", "/srv/new");
        input.scan_mode = "EVENTUALLY".into();
        input.library_pattern = "FLAT".into();

        let errors = schema.validate(&input).unwrap_err();
        assert_eq!(
            errors.get(FormField::ScanMode),
            Some(&FieldError::InvalidScanMode("EVENTUALLY".into()))
        );
        assert_eq!(
            errors.get(FormField::LibraryPattern),
            Some(&FieldError::InvalidPattern("FLAT".into()))
        );
    }

    #[test]
    fn names_and_paths_are_trimmed() {
        let schema = LibraryFormSchema::new(&libraries(), None);
        let validated = schema.validate(&values("  Books ", " /srv/books ")).unwrap();
        assert_eq!(validated.name, "Books");
        assert_eq!(validated.path, "/srv/books");

        let errors = schema.validate(&values(" Comics ", "/srv/x")).unwrap_err();
        assert_eq!(errors.get(FormField::Name), Some(&FieldError::NameTaken("Comics".into())));
    }
}
