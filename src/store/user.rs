use super::Store;
use crate::blog::User;
use crate::error::{Error, Result};

impl Store {
    pub async fn find_user(&self, username: &str) -> Result<User> {
        self.tables
            .read()
            .await
            .users
            .get(username)
            .cloned()
            .ok_or(Error::NotFound)
    }

    pub async fn create_user(&self, user: User) -> Result<()> {
        self.mutate(|tables| {
            if tables.users.contains_key(&user.username) {
                return Err(Error::Conflict(format!(
                    "username {} is taken",
                    user.username
                )));
            }

            tracing::info!(username = %user.username, "created user");
            tables.users.insert(user.username.clone(), user);

            Ok(())
        })
        .await
    }
}
