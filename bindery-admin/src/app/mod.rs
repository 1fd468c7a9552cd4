pub mod bootstrap;
pub mod cli;
pub mod runner;

pub use bootstrap::AppConfig;
pub use cli::Cli;
pub use runner::run;
