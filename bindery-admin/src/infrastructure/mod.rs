//! Infrastructure module containing the HTTP client, service seams, and
//! configuration shared by all domains

pub mod adapters;
pub mod api_client;
pub mod config;
pub mod constants;
pub mod repository;
pub mod services;
pub mod testing;

pub use api_client::ApiClient;
pub use config::Config;
pub use repository::{RepositoryError, RepositoryResult};
pub use services::ApiService;
