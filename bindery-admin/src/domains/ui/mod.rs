pub mod feedback_ui;
pub mod navigation;

pub use navigation::{Navigator, PendingNavigation, Route};
