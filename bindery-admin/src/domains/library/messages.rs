use super::types::TagOption;

#[derive(Clone)]
pub enum Message {
    // Field edits
    SetName(String),
    SetPath(String),
    SetDescription(String),
    SetTags(Vec<TagOption>),
    SetScanMode(String),
    SetLibraryPattern(String),
    SetConvertRarToZip(bool),
    SetCreateWebpThumbnails(bool),
    SetHardDeleteConversions(bool),

    // Directory picker
    BrowseForPath,
    PathSelected(Option<String>),

    // Tags
    CreateTag(String),

    // Form lifecycle
    Submit,
    Reset,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetName(_) => "LibraryForm::SetName",
            Self::SetPath(_) => "LibraryForm::SetPath",
            Self::SetDescription(_) => "LibraryForm::SetDescription",
            Self::SetTags(_) => "LibraryForm::SetTags",
            Self::SetScanMode(_) => "LibraryForm::SetScanMode",
            Self::SetLibraryPattern(_) => "LibraryForm::SetLibraryPattern",
            Self::SetConvertRarToZip(_) => "LibraryForm::SetConvertRarToZip",
            Self::SetCreateWebpThumbnails(_) => {
                "LibraryForm::SetCreateWebpThumbnails"
            }
            Self::SetHardDeleteConversions(_) => {
                "LibraryForm::SetHardDeleteConversions"
            }
            Self::BrowseForPath => "LibraryForm::BrowseForPath",
            Self::PathSelected(_) => "LibraryForm::PathSelected",
            Self::CreateTag(_) => "LibraryForm::CreateTag",
            Self::Submit => "LibraryForm::Submit",
            Self::Reset => "LibraryForm::Reset",
        }
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetName(name) => write!(f, "LibraryForm::SetName({name:?})"),
            Self::SetPath(path) => write!(f, "LibraryForm::SetPath({path:?})"),
            Self::SetTags(tags) => {
                write!(f, "LibraryForm::SetTags({} tags)", tags.len())
            }
            Self::PathSelected(path) => {
                write!(f, "LibraryForm::PathSelected({path:?})")
            }
            Self::CreateTag(name) => {
                write!(f, "LibraryForm::CreateTag({name:?})")
            }
            _ => f.write_str(self.name()),
        }
    }
}
