//! Account business logic - Registration and authentication.
//!
//! Passwords are hashed with Argon2 before they reach the store. A successful
//! [`authenticate`] call is the only public way to obtain a [`Session`].

use crate::{
    core::session::Session,
    entities::{Account, Role, account},
    errors::{Error, Result},
};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 4;

/// Registers a new account with a fixed role.
///
/// # Errors
/// Returns an error if:
/// - The username is empty or whitespace-only
/// - The password is shorter than [`MIN_PASSWORD_LEN`]
/// - The username is already taken (`Error::Duplicate`)
/// - The database insert operation fails
#[instrument(skip(db, password))]
pub async fn register_account(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: Role,
) -> Result<account::Model> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::validation("Username cannot be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = hash_password(password)?;
    let account = account::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let account = account
        .insert(db)
        .await
        .map_err(|e| Error::from_insert(e, "Account", username))?;

    info!("Registered {} account '{}' (ID: {})", role, account.username, account.id);
    Ok(account)
}

/// Checks a username/password pair and opens a session for the account.
///
/// # Errors
/// Returns `Error::InvalidCredentials` for an unknown username or a wrong password,
/// and a storage error if the lookup fails.
#[instrument(skip(db, password))]
pub async fn authenticate(db: &DatabaseConnection, username: &str, password: &str) -> Result<Session> {
    let account = Account::find()
        .filter(account::Column::Username.eq(username.trim()))
        .one(db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &account.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    info!("Account '{}' signed in as {}", account.username, account.role);
    Ok(Session::from_account(&account))
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })
}

fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| Error::PasswordHash {
        message: e.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_register_and_authenticate() -> Result<()> {
        let db = setup_test_db().await?;

        let account = register_account(&db, "  alice ", "s3cret", Role::Manager).await?;
        assert_eq!(account.username, "alice");
        assert_eq!(account.role, Role::Manager);
        assert_ne!(account.password_hash, "s3cret");

        let session = authenticate(&db, "alice", "s3cret").await?;
        assert_eq!(session.account_id, account.id);
        assert_eq!(session.role, Role::Manager);
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_credentials() -> Result<()> {
        let db = setup_test_db().await?;
        register_account(&db, "bob", "hunter2", Role::Cashier).await?;

        let wrong_password = authenticate(&db, "bob", "hunter3").await;
        assert!(matches!(wrong_password, Err(Error::InvalidCredentials)));

        let unknown_user = authenticate(&db, "carol", "hunter2").await;
        assert!(matches!(unknown_user, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_username() -> Result<()> {
        let db = setup_test_db().await?;
        register_account(&db, "dave", "pass1234", Role::Cashier).await?;

        let result = register_account(&db, "dave", "other-pass", Role::Manager).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Duplicate { entity: "Account", .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register_account(&db, "   ", "pass1234", Role::Cashier).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = register_account(&db, "erin", "abc", Role::Cashier).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        assert_eq!(Account::find().count(&db).await?, 0);
        Ok(())
    }
}
