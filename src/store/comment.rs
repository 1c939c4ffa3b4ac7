use super::{next_id, Store};
use crate::blog::{Comment, PostID};
use crate::error::{Error, Result};

impl Store {
    pub async fn add_comment(&self, post_id: PostID, author: &str, text: &str) -> Result<Comment> {
        self.mutate(|tables| {
            if !tables.posts.contains_key(&post_id) {
                return Err(Error::NotFound);
            }

            let comment = Comment {
                id: next_id(&mut tables.sequences.comment),
                post: post_id,
                author: author.to_owned(),
                text: text.to_owned(),
                created_at: chrono::Utc::now(),
            };
            tables.comments.insert(comment.id, comment.clone());

            Ok(comment)
        })
        .await
    }

    /// Oldest first.
    pub async fn comments_for_post(&self, post_id: PostID) -> Vec<Comment> {
        self.tables
            .read()
            .await
            .comments
            .values()
            .filter(|comment| comment.post == post_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::new_post;

    #[tokio::test]
    async fn comments_attach_to_their_post() {
        let store = Store::in_memory();
        let (first, _) = store.create_post(new_post("a", "c"), vec![]).await.unwrap();
        let (second, _) = store.create_post(new_post("b", "c"), vec![]).await.unwrap();

        store.add_comment(first.id, "bob", "first!").await.unwrap();
        store.add_comment(first.id, "carol", "second").await.unwrap();
        store.add_comment(second.id, "bob", "elsewhere").await.unwrap();

        let texts = store
            .comments_for_post(first.id)
            .await
            .into_iter()
            .map(|comment| comment.text)
            .collect::<Vec<_>>();
        assert_eq!(texts, ["first!", "second"]);
    }

    #[tokio::test]
    async fn commenting_on_a_missing_post_is_not_found() {
        let store = Store::in_memory();
        assert!(matches!(
            store.add_comment(1, "bob", "hello").await,
            Err(Error::NotFound)
        ));
    }
}
