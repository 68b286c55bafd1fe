//! Error types

mod data;
mod schema;

pub use data::*;
pub use schema::*;

/// Top-level error type for the list-view engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Schema/metadata loading failed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A record count or page fetch failed.
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

impl Error {
    /// Returns the human-readable message to surface to the user.
    ///
    /// Prefers the service-supplied message and falls back to a generic
    /// string when none is available.
    pub fn user_message(&self) -> String {
        match self {
            Error::Schema(e) => e.user_message(),
            Error::Data(e) => e.user_message(),
        }
    }
}
