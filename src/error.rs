//! Errors surfaced by the client side.

use thiserror::Error;

use crate::models::Scope;

/// A user-level operation on notes. Errors name the one that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Save,
    Pin,
    Archive,
    Unarchive,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Pin => "pin",
            Self::Archive => "archive",
            Self::Unarchive => "unarchive",
            Self::Delete => "delete",
        }
    }

    /// Text of the blocking notification shown when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Load => "Failed to load notes",
            Self::Save => "Failed to save note",
            Self::Pin => "Failed to toggle pin",
            Self::Archive => "Failed to archive notes",
            Self::Unarchive => "Failed to unarchive notes",
            Self::Delete => "Failed to delete notes",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request to the note store that did not succeed.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never completed (connection refused, timeout, bad body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Storage { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally, nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("{op} failed: {source}")]
    Request {
        op: Operation,
        #[source]
        source: RequestError,
    },

    /// Some requests of a bulk operation failed. The ones not listed went through.
    #[error("{op} failed for {count} note(s)", count = .failed.len())]
    Partial {
        op: Operation,
        failed: Vec<(i64, RequestError)>,
    },

    #[error("{op} is not available for {scope} notes")]
    Unsupported { op: Operation, scope: Scope },

    #[error("note {0} is not loaded")]
    NotLoaded(i64),

    /// The store has no note with this id.
    #[error("note {0} not found")]
    NotFound(i64),
}

impl ClientError {
    /// Adapter for `map_err`, tagging a request failure with `op`.
    pub fn request(op: Operation) -> impl FnOnce(RequestError) -> Self {
        move |source| Self::Request { op, source }
    }

    /// The operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Request { op, .. } | Self::Partial { op, .. } | Self::Unsupported { op, .. } => {
                Some(*op)
            }
            Self::Validation(_) | Self::NotLoaded(_) | Self::NotFound(_) => None,
        }
    }

    /// Ids whose request failed in a bulk operation.
    pub fn failed_ids(&self) -> Vec<i64> {
        match self {
            Self::Partial { failed, .. } => failed.iter().map(|(id, _)| *id).collect(),
            _ => Vec::new(),
        }
    }

    /// Message for the user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Request { op, .. } => op.failure_message().to_string(),
            Self::Partial { op, .. } => {
                let ids = self
                    .failed_ids()
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} (failed: {})", op.failure_message(), ids)
            }
            Self::Unsupported { op, scope } => {
                format!("Cannot {} {} notes", op, scope)
            }
            Self::NotLoaded(id) => format!("Note {} is not loaded", id),
            Self::NotFound(id) => format!("Note {} not found", id),
        }
    }
}
