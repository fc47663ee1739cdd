//! Defines the app level error type.

use crate::storage::StorageError;

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing or invalid on the sign-up form or a
    /// record form.
    ///
    /// The message is intended to be shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// There is no account registered under the given email address.
    #[error("User not found")]
    NotFound,

    /// The password did not match the one stored for the account.
    #[error("Invalid password")]
    InvalidCredentials,

    /// A stored value could not be deserialized.
    ///
    /// Record collections recover from this by starting empty, so this error
    /// is not shown to the user.
    #[error("could not deserialize stored value: {0}")]
    Deserialization(String),

    /// A value could not be serialized for storage.
    #[error("could not serialize value: {0}")]
    Serialization(String),

    /// A record intent was issued while no user is logged in.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// The storage adapter failed to read or write a value.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Shortcut for creating a [Error::Validation] from a string slice.
    pub(crate) fn validation(message: &str) -> Self {
        Self::Validation(message.to_owned())
    }
}

#[cfg(test)]
mod error_tests {
    use crate::{Error, storage::StorageError};

    #[test]
    fn auth_errors_display_user_facing_messages() {
        assert_eq!(Error::NotFound.to_string(), "User not found");
        assert_eq!(Error::InvalidCredentials.to_string(), "Invalid password");
        assert_eq!(
            Error::validation("Please fill in all fields").to_string(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn storage_error_converts_into_error() {
        let error: Error = StorageError::Lock.into();

        assert_eq!(error, Error::Storage(StorageError::Lock));
    }
}
