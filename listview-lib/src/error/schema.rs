//! Schema/metadata error types

use super::DataError;

/// Errors that can occur while loading object metadata.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The object type is unknown to the metadata service.
    #[error("Unknown object type: {0}")]
    UnknownObject(String),

    /// The metadata service call itself failed.
    #[error("Metadata load failed for {object}: {source}")]
    Load {
        /// Object type being loaded.
        object: String,
        /// Underlying service failure.
        #[source]
        source: DataError,
    },
}

impl SchemaError {
    /// Creates a load error wrapping a service failure.
    pub fn load(object: impl Into<String>, source: DataError) -> Self {
        Self::Load {
            object: object.into(),
            source,
        }
    }

    /// Returns the human-readable message to surface to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownObject(object) => format!("Unknown object type: {object}"),
            Self::Load { source, .. } => source.user_message(),
        }
    }
}
