//! Command line surface for driving the library form headlessly

use clap::{Args, Parser, Subcommand};

use crate::domains::library::{LibraryFormMessage, TagOption};

#[derive(Debug, Parser)]
#[command(name = "bindery-admin", version, about = "Create and edit Bindery libraries")]
pub struct Cli {
    /// Library server base URL
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Run against an in-memory server seeded with sample data
    #[arg(long, global = true)]
    pub offline: bool,

    /// Milliseconds to wait before navigating away after a save
    #[arg(long, global = true)]
    pub navigation_delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new library
    Create(LibraryArgs),
    /// Edit an existing library, looked up by id or name
    Edit {
        target: String,
        #[command(flatten)]
        fields: LibraryArgs,
    },
    /// Inspect or create tags
    #[command(subcommand)]
    Tags(TagsCommand),
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    List,
    Create { name: String },
}

/// Form fields; anything left out keeps the form's default value
#[derive(Debug, Clone, Default, Args)]
pub struct LibraryArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub path: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Tag name, repeatable. Replaces the library's tag set.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Remove every tag
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    /// SYNC, BATCHED or NONE
    #[arg(long)]
    pub scan_mode: Option<String>,

    /// SERIES_BASED or COLLECTION_BASED
    #[arg(long)]
    pub pattern: Option<String>,

    #[arg(long)]
    pub convert_rar_to_zip: Option<bool>,

    #[arg(long)]
    pub create_webp_thumbnails: Option<bool>,

    #[arg(long)]
    pub hard_delete_conversions: Option<bool>,
}

impl LibraryArgs {
    /// The edits these arguments describe, in form message order
    pub fn messages(&self) -> Vec<LibraryFormMessage> {
        let mut messages = Vec::new();
        if let Some(name) = &self.name {
            messages.push(LibraryFormMessage::SetName(name.clone()));
        }
        if let Some(path) = &self.path {
            messages.push(LibraryFormMessage::SetPath(path.clone()));
        }
        if let Some(description) = &self.description {
            messages.push(LibraryFormMessage::SetDescription(description.clone()));
        }
        if self.clear_tags {
            messages.push(LibraryFormMessage::SetTags(Vec::new()));
        } else if !self.tags.is_empty() {
            messages.push(LibraryFormMessage::SetTags(
                self.tags.iter().map(TagOption::new).collect(),
            ));
        }
        if let Some(mode) = &self.scan_mode {
            messages.push(LibraryFormMessage::SetScanMode(mode.to_ascii_uppercase()));
        }
        if let Some(pattern) = &self.pattern {
            messages.push(LibraryFormMessage::SetLibraryPattern(
                pattern.to_ascii_uppercase(),
            ));
        }
        if let Some(value) = self.convert_rar_to_zip {
            messages.push(LibraryFormMessage::SetConvertRarToZip(value));
        }
        if let Some(value) = self.create_webp_thumbnails {
            messages.push(LibraryFormMessage::SetCreateWebpThumbnails(value));
        }
        if let Some(value) = self.hard_delete_conversions {
            messages.push(LibraryFormMessage::SetHardDeleteConversions(value));
        }
        messages
    }
}
