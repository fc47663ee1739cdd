//! Account sign-up and log-in against the records in storage.

use crate::{
    Error,
    codec::{decode, encode},
    id::UserId,
    storage::{Storage, user_key},
    user::{Session, User},
};

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// Register a new account and return its session.
///
/// An existing account with the same email is silently replaced.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` or `password` is empty ([Error::Validation]), in which case nothing is written,
/// - the user record could not be written to `storage`.
pub async fn sign_up<S: Storage + ?Sized>(
    storage: &S,
    email: &str,
    password: &str,
) -> Result<Session, Error> {
    validate_credentials(email, password)?;

    let user = User {
        id: UserId::generate(),
        email: email.to_owned(),
        password: password.to_owned(),
    };

    storage.set(&user_key(email), &encode(&user)?).await?;
    tracing::info!("Registered user {} with ID {}", user.email, user.id);

    Ok(user.session())
}

/// Check `email` and `password` against the stored account and return its session.
///
/// Nothing is written to `storage`.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` or `password` is empty ([Error::Validation]),
/// - there is no readable account stored for `email` ([Error::NotFound]),
/// - `password` does not exactly match the stored password ([Error::InvalidCredentials]),
/// - `storage` could not be read.
pub async fn log_in<S: Storage + ?Sized>(
    storage: &S,
    email: &str,
    password: &str,
) -> Result<Session, Error> {
    validate_credentials(email, password)?;

    let Some(text) = storage.get(&user_key(email)).await? else {
        tracing::info!("Log-in attempt for unknown email {email}");
        return Err(Error::NotFound);
    };

    let user: User = decode(&text).map_err(|error| {
        tracing::warn!("Could not read the user record for {email}: {error}");
        Error::NotFound
    })?;

    if user.password != password {
        tracing::info!("Log-in attempt with an invalid password for {email}");
        return Err(Error::InvalidCredentials);
    }

    tracing::info!("User {} logged in", user.id);

    Ok(user.session())
}

fn validate_credentials(email: &str, password: &str) -> Result<(), Error> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::validation(MISSING_FIELDS_MESSAGE));
    }

    Ok(())
}

#[cfg(test)]
mod sign_up_tests {
    use crate::{
        Error,
        auth::sign_up,
        storage::{MemoryStorage, Storage},
        test_utils::CountingStorage,
        user::User,
    };

    #[tokio::test]
    async fn sign_up_stores_user_under_email_key() {
        let storage = MemoryStorage::new();

        let session = sign_up(&storage, "foo@bar.baz", "hunter2").await.unwrap();

        let text = storage.get("user_foo@bar.baz").await.unwrap().unwrap();
        let user: User = serde_json::from_str(&text).unwrap();
        assert_eq!(user.id, session.id);
        assert_eq!(user.email, "foo@bar.baz");
        assert_eq!(user.password, "hunter2");
        assert_eq!(session.email, "foo@bar.baz");
    }

    #[tokio::test]
    async fn sign_up_with_empty_password_fails_without_writing() {
        let storage = CountingStorage::new();

        let result = sign_up(&storage, "foo@bar.baz", "").await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(storage.set_count(), 0);
    }

    #[tokio::test]
    async fn sign_up_with_empty_email_fails_without_writing() {
        let storage = CountingStorage::new();

        let result = sign_up(&storage, "", "hunter2").await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(storage.set_count(), 0);
    }

    #[tokio::test]
    async fn sign_up_overwrites_existing_account() {
        let storage = MemoryStorage::new();

        let first = sign_up(&storage, "foo@bar.baz", "hunter2").await.unwrap();
        let second = sign_up(&storage, "foo@bar.baz", "hunter3").await.unwrap();

        assert_ne!(first.id, second.id);
        let text = storage.get("user_foo@bar.baz").await.unwrap().unwrap();
        let user: User = serde_json::from_str(&text).unwrap();
        assert_eq!(user.id, second.id);
        assert_eq!(user.password, "hunter3");
    }
}
