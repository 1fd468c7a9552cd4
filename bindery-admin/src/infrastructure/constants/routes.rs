//! Client-side route paths used for in-app navigation.

/// Home screen
pub const HOME: &str = "/";

/// Library admin screens
pub mod libraries {
    /// Create library form
    pub const CREATE: &str = "/libraries/create";
    /// Edit library form (requires id parameter)
    pub const MANAGE: &str = "/libraries/{id}/manage";
}
