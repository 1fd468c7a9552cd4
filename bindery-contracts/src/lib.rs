//! Wire payloads and trait surfaces that describe interactions with the
//! Bindery library server.

pub mod api;
pub mod routes;

pub use routes::v1 as api_routes;

/// Frequently used payloads for client crates.
pub mod prelude {
    pub use super::api::{
        ApiResponse, CreateLibraryRequest, CreateTagsRequest,
        EditLibraryRequest,
    };
    pub use super::routes::utils::replace_param;
    pub use super::routes::v1 as api_routes;
    pub use bindery_model::LibraryLike;
}
