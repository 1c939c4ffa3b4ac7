use super::Store;
use crate::blog::PostID;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

/// Outcome of flipping one reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub active: bool,
    pub total: usize,
}

impl Store {
    pub async fn toggle_like(&self, post_id: PostID, username: &str) -> Result<Toggle> {
        self.toggle_reaction(post_id, username, Reaction::Like).await
    }

    pub async fn toggle_dislike(&self, post_id: PostID, username: &str) -> Result<Toggle> {
        self.toggle_reaction(post_id, username, Reaction::Dislike).await
    }

    /// Adding a reaction clears the opposite one, so a user never both likes
    /// and dislikes a post.
    async fn toggle_reaction(
        &self,
        post_id: PostID,
        username: &str,
        reaction: Reaction,
    ) -> Result<Toggle> {
        self.mutate(|tables| {
            let post = tables.posts.get_mut(&post_id).ok_or(Error::NotFound)?;

            let (chosen, opposite) = match reaction {
                Reaction::Like => (&mut post.likes, &mut post.dislikes),
                Reaction::Dislike => (&mut post.dislikes, &mut post.likes),
            };

            let active = if chosen.remove(username) {
                false
            } else {
                chosen.insert(username.to_owned());
                opposite.remove(username);
                true
            };
            let total = chosen.len();

            tracing::debug!(post_id, username, ?reaction, active, total, "toggled reaction");

            Ok(Toggle { active, total })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::new_post;

    #[tokio::test]
    async fn like_twice_returns_to_start() {
        let store = Store::in_memory();
        let (post, _) = store.create_post(new_post("p", "c"), vec![]).await.unwrap();

        let first = store.toggle_like(post.id, "alice").await.unwrap();
        assert_eq!(first, Toggle { active: true, total: 1 });

        let second = store.toggle_like(post.id, "alice").await.unwrap();
        assert_eq!(second, Toggle { active: false, total: 0 });
    }

    #[tokio::test]
    async fn likes_count_every_user() {
        let store = Store::in_memory();
        let (post, _) = store.create_post(new_post("p", "c"), vec![]).await.unwrap();

        store.toggle_like(post.id, "alice").await.unwrap();
        let toggle = store.toggle_like(post.id, "bob").await.unwrap();

        assert_eq!(toggle, Toggle { active: true, total: 2 });
    }

    #[tokio::test]
    async fn like_and_dislike_are_mutually_exclusive() {
        let store = Store::in_memory();
        let (post, _) = store.create_post(new_post("p", "c"), vec![]).await.unwrap();

        store.toggle_dislike(post.id, "alice").await.unwrap();
        store.toggle_like(post.id, "alice").await.unwrap();

        let post = store.find_post(post.id).await.unwrap();
        assert!(post.likes.contains("alice"));
        assert!(!post.dislikes.contains("alice"));

        let toggle = store.toggle_dislike(post.id, "alice").await.unwrap();
        assert_eq!(toggle, Toggle { active: true, total: 1 });

        let post = store.find_post(post.id).await.unwrap();
        assert!(post.likes.is_empty());
    }

    #[tokio::test]
    async fn toggling_a_missing_post_is_not_found() {
        let store = Store::in_memory();
        assert!(matches!(
            store.toggle_like(9, "alice").await,
            Err(Error::NotFound)
        ));
    }
}
