//! Errors surfaced to the user by library operations.

use crate::link_meta::LinkId;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Deleting the only remaining tag is refused before anything is written.
    #[error("at least one tag must remain")]
    LastTag,
    /// Deleting the only remaining classification is refused before anything is written.
    #[error("at least one classification must remain")]
    LastClassification,
    /// The name is part of the built-in vocabulary and would still be listed.
    #[error("{0} is built in and cannot be deleted")]
    BuiltIn(String),
    #[error("no link with id {0}")]
    UnknownLink(LinkId),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    /// The store rejected a call; local state was left unchanged.
    #[error("{action} failed: {message}")]
    Store {
        action: &'static str,
        message: String,
    },
}

impl LibraryError {
    pub(crate) fn store(action: &'static str, err: anyhow::Error) -> Self {
        tracing::error!("{action} failed: {err:#}");
        LibraryError::Store {
            action,
            message: format!("{err:#}"),
        }
    }
}
