//! Error types for descriptor validation.

/// Result type for descriptor operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a plugin descriptor is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A route record has no parent route name.
    #[error("Route '{path}' has an empty parent name")]
    EmptyParentName { path: String },

    /// A named route has an empty name.
    #[error("Route '{path}' has an empty name")]
    EmptyRouteName { path: String },

    /// Two routes share the same name.
    #[error("Route name '{name}' is used more than once")]
    DuplicateRouteName { name: String },

    /// A top-level route path is not absolute.
    #[error("Top-level route path '{path}' must start with '/'")]
    RelativeRootPath { path: String },
}

impl Error {
    /// Create a duplicate route name error
    pub fn duplicate_route_name(name: impl Into<String>) -> Self {
        Self::DuplicateRouteName { name: name.into() }
    }
}
