//! Bindery admin library
//!
//! This crate contains the library create/edit form used by the
//! `bindery-admin` executable in `src/main.rs`: validation, live preview,
//! tag handling, and the create/edit submission flow with its toast
//! lifecycle and deferred navigation.
//!
//! Notes
//! - Rendering is left to the embedding UI; the form is driven entirely
//!   through messages and exposes its state for views to read.
//! - The library is exposed mainly to enable testing and reuse by the binary.

pub mod app;
pub mod domains;
pub mod infrastructure;
