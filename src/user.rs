//! The user account and the session derived from it.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A registered account as stored under `user_<email>`.
///
/// The password is stored as entered and compared exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID, used to namespace their collections.
    pub id: UserId,
    /// The email address the account was registered with.
    pub email: String,
    /// The account password.
    pub password: String,
}

impl User {
    /// The session for this user, i.e. the user without their password.
    pub fn session(&self) -> Session {
        Session {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// The identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The user's ID.
    pub id: UserId,
    /// The user's email address.
    pub email: String,
}
