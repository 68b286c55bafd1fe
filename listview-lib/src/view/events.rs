//! Events emitted to the hosting surface

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastVariant {
    /// Error toast.
    Error,
    /// Warning toast.
    Warning,
    /// Success toast.
    Success,
    /// Informational toast.
    Info,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    /// Short title.
    pub title: String,
    /// Human-readable message.
    pub message: String,
    /// Severity.
    pub variant: ToastVariant,
    /// Whether the toast stays until dismissed.
    pub sticky: bool,
}

impl Toast {
    /// Creates a sticky error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            variant: ToastVariant::Error,
            sticky: true,
        }
    }
}

/// Notifications the list view emits to its host.
///
/// Row-level record selection events are the sole extension points for
/// navigation; navigation itself is the host's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListViewEvent {
    /// A record was selected for viewing.
    RecordView {
        /// Identifier of the selected record.
        record_id: Uuid,
    },
    /// A record was selected for editing.
    RecordEdit {
        /// Identifier of the selected record.
        record_id: Uuid,
    },
    /// A notification to present to the user.
    Toast(Toast),
}
