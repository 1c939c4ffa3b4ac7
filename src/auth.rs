use crate::blog::User;
use crate::error::{Error, Result};
use crate::store::Store;
use argon2::{PasswordHasher, PasswordVerifier};
use rand::SeedableRng;

// dummy unit tuple so `Auth`s can't be instantiated outside of this file
pub struct Auth(());

fn hash_password(password: &str) -> argon2::password_hash::Result<String> {
    let salt =
        argon2::password_hash::SaltString::generate(&mut rand_chacha::ChaCha20Rng::from_entropy());

    Ok(argon2::Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}
fn verify_password(password: &str, hash: &str) -> argon2::password_hash::Result<bool> {
    let hash = argon2::password_hash::PasswordHash::new(hash)?;

    match argon2::Argon2::default().verify_password(password.as_bytes(), &hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

impl Auth {
    /// `Ok(Some(Auth))` if valid, `Ok(None)` if the user doesn't exist or the
    /// password is wrong
    pub async fn validate(store: &Store, username: &str, password: String) -> Result<Option<Auth>> {
        let hash = match store.find_user(username).await {
            Ok(user) => user.password_hash,
            Err(Error::NotFound) => return Ok(None),
            Err(err) => return Err(err),
        };

        let password_is_valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

        Ok(password_is_valid.then_some(Auth(())))
    }

    /// Fails with [`Error::Conflict`] if the username is taken.
    pub async fn register(store: &Store, username: &str, password: String) -> Result<Auth> {
        if store.find_user(username).await.is_ok() {
            return Err(Error::Conflict(format!("username {username} is taken")));
        }

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        store
            .create_user(User {
                username: username.to_owned(),
                password_hash,
                date_joined: chrono::Utc::now(),
            })
            .await?;

        Ok(Auth(()))
    }
}
