//! In-memory service doubles.
//!
//! Compiled into the library (not only under `cfg(test)`) because the binary's
//! `--offline` mode runs the form pipeline against them.

pub mod stubs;

pub use stubs::api::TestApiService;
