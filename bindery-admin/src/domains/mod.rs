//! Domain modules for the Bindery admin client
//!
//! `library` holds the create/edit form and its submission flow; `ui` holds
//! the feedback and navigation pieces the form hands control to.

pub mod library;
pub mod ui;
