//! In-process record store for users, posts, categories, images and comments.
//!
//! Every mutation takes the write lock once, so related records (a post and
//! its images, a like and the matching dislike removal) change together. When
//! opened on a directory, the full table set is written to `db.json` after each
//! mutation and read back on startup. A mutation whose snapshot can't be
//! written is undone before the error is returned.

use crate::blog::{BlogImage, Category, Comment, Post, User, Username};
use crate::blog::{CategoryID, CommentID, ImageID, PostID};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub mod category;
pub mod comment;
pub mod post;
pub mod reaction;
pub mod user;

const SNAPSHOT_FILE: &str = "db.json";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Tables {
    pub users: BTreeMap<Username, User>,
    pub categories: BTreeMap<CategoryID, Category>,
    pub posts: BTreeMap<PostID, Post>,
    pub images: BTreeMap<ImageID, BlogImage>,
    pub comments: BTreeMap<CommentID, Comment>,
    sequences: Sequences,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Sequences {
    category: CategoryID,
    post: PostID,
    image: ImageID,
    comment: CommentID,
}

fn next_id(sequence: &mut u64) -> u64 {
    *sequence += 1;
    *sequence
}

#[derive(Debug)]
pub struct Store {
    tables: RwLock<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl Store {
    pub fn in_memory() -> Store {
        Store {
            tables: RwLock::new(Tables::default()),
            snapshot_path: None,
        }
    }

    pub async fn open(dir: &Path) -> Result<Store> {
        tokio::fs::create_dir_all(dir).await?;
        let snapshot_path = dir.join(SNAPSHOT_FILE);

        let tables = match tokio::fs::read(&snapshot_path).await {
            Ok(raw) => serde_json::from_slice::<Tables>(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = ?snapshot_path, "no snapshot found, starting empty");
                Tables::default()
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            users = tables.users.len(),
            posts = tables.posts.len(),
            comments = tables.comments.len(),
            "loaded store"
        );

        Ok(Store {
            tables: RwLock::new(tables),
            snapshot_path: Some(snapshot_path),
        })
    }

    /// Runs `change` under the write lock and snapshots the result. `change`
    /// must only return `Err` before it has touched `tables`.
    async fn mutate<T>(&self, change: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut tables = self.tables.write().await;
        let before = self.snapshot_path.is_some().then(|| tables.clone());

        let outcome = change(&mut tables)?;

        if let Err(err) = self.persist(&tables).await {
            if let Some(before) = before {
                *tables = before;
            }
            tracing::warn!(error = %err, "could not write snapshot, change rolled back");
            return Err(err);
        }

        Ok(outcome)
    }

    async fn persist(&self, tables: &Tables) -> Result<()> {
        let Some(snapshot_path) = self.snapshot_path.as_ref() else {
            return Ok(());
        };

        let staging_path = snapshot_path.with_extension("json.tmp");
        tokio::fs::write(&staging_path, serde_json::to_vec(tables)?).await?;
        tokio::fs::rename(&staging_path, snapshot_path).await?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::post::{NewPost, PostChanges};

    /// Makes every later snapshot write fail by occupying the staging path.
    pub(crate) async fn block_snapshots(dir: &Path) {
        tokio::fs::create_dir_all(dir.join("db.json.tmp")).await.unwrap();
    }

    pub(crate) fn new_post(title: &str, content: &str) -> NewPost {
        NewPost {
            title: title.into(),
            content: content.into(),
            author: Some("alice".into()),
            category: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let post_id = {
            let store = Store::open(dir.path()).await.unwrap();
            let (post, _) = store
                .create_post(new_post("kept", "body"), vec!["blog_images/a.png".into()])
                .await
                .unwrap();
            store.toggle_like(post.id, "bob").await.unwrap();
            post.id
        };

        let store = Store::open(dir.path()).await.unwrap();
        let post = store.find_post(post_id).await.unwrap();

        assert_eq!(post.title, "kept");
        assert!(post.likes.contains("bob"));
        assert_eq!(store.images_for_post(post_id).await.len(), 1);

        // ids keep counting from where they left off
        let (next, _) = store.create_post(new_post("next", "body"), vec![]).await.unwrap();
        assert_eq!(next.id, post_id + 1);
    }

    #[tokio::test]
    async fn failed_snapshot_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let (kept, _) = store.create_post(new_post("kept", "body"), vec![]).await.unwrap();

        block_snapshots(dir.path()).await;

        assert!(matches!(
            store
                .create_post(new_post("lost", "body"), vec!["blog_images/a.png".into()])
                .await,
            Err(Error::Io(_))
        ));
        assert!(store
            .update_post(
                kept.id,
                PostChanges {
                    title: "renamed".into(),
                    content: "body".into(),
                    category: None,
                    image: Some("post_images/new.png".into()),
                },
            )
            .await
            .is_err());
        assert!(store.toggle_like(kept.id, "bob").await.is_err());
        assert!(store.add_comment(kept.id, "bob", "hi").await.is_err());
        assert!(store.get_or_create_category("travel").await.is_err());
        assert!(store.delete_post(kept.id).await.is_err());

        let posts = store.posts_latest_first().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "kept");
        assert_eq!(posts[0].image, None);
        assert!(posts[0].likes.is_empty());
        assert!(store.comments_for_post(kept.id).await.is_empty());
        assert!(store.categories().await.is_empty());
        assert!(store.images_for_post(kept.id + 1).await.is_empty());

        tokio::fs::remove_dir(dir.path().join("db.json.tmp")).await.unwrap();

        // the rolled back insert gave its id back
        let (next, _) = store.create_post(new_post("next", "body"), vec![]).await.unwrap();
        assert_eq!(next.id, kept.id + 1);
    }
}
