use super::{next_id, Store};
use crate::blog::{BlogImage, CategoryID, Post, PostID, PostSummary, Username};
use crate::error::{Error, Result};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Option<Username>,
    pub category: Option<CategoryID>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub category: Option<CategoryID>,
    /// `None` keeps the current cover image.
    pub image: Option<String>,
}

fn latest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date_posted.cmp(&a.date_posted).then(b.id.cmp(&a.id)));
}

impl Store {
    pub async fn find_post(&self, post_id: PostID) -> Result<Post> {
        self.tables
            .read()
            .await
            .posts
            .get(&post_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    pub async fn posts_latest_first(&self) -> Vec<Post> {
        let mut posts = self
            .tables
            .read()
            .await
            .posts
            .values()
            .cloned()
            .collect::<Vec<_>>();
        latest_first(&mut posts);
        posts
    }

    pub async fn posts_by_author(&self, username: &str) -> Vec<Post> {
        let mut posts = self
            .tables
            .read()
            .await
            .posts
            .values()
            .filter(|post| post.is_authored_by(username))
            .cloned()
            .collect::<Vec<_>>();
        latest_first(&mut posts);
        posts
    }

    /// `None` if no category has this name (ignoring case), otherwise that
    /// category's posts in id order.
    pub async fn find_posts_by_category_name(&self, name: &str) -> Option<Vec<Post>> {
        let tables = self.tables.read().await;
        let category = super::category::find_by_name(&tables, name)?;

        Some(
            tables
                .posts
                .values()
                .filter(|post| post.category == Some(category.id))
                .cloned()
                .collect(),
        )
    }

    /// Posts whose title or content contains `needle`, ignoring case, in id order.
    pub async fn find_posts_by_title_or_content_containing(&self, needle: &str) -> Vec<Post> {
        let needle = needle.to_lowercase();

        self.tables
            .read()
            .await
            .posts
            .values()
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub async fn images_for_post(&self, post_id: PostID) -> Vec<BlogImage> {
        self.tables
            .read()
            .await
            .images
            .values()
            .filter(|image| image.post == post_id)
            .cloned()
            .collect()
    }

    pub async fn summarize(&self, posts: &[Post]) -> Vec<PostSummary> {
        let tables = self.tables.read().await;

        posts
            .iter()
            .map(|post| {
                let images = tables
                    .images
                    .values()
                    .filter(|image| image.post == post.id)
                    .cloned()
                    .collect::<Vec<_>>();
                PostSummary::new(post, &images)
            })
            .collect()
    }

    /// Inserts the post together with one [`BlogImage`] per stored image path.
    pub async fn create_post(
        &self,
        new_post: NewPost,
        image_paths: Vec<String>,
    ) -> Result<(Post, Vec<BlogImage>)> {
        self.mutate(|tables| {
            let post = Post {
                id: next_id(&mut tables.sequences.post),
                title: new_post.title,
                content: new_post.content,
                author: new_post.author,
                date_posted: chrono::Utc::now(),
                category: new_post.category,
                image: new_post.image,
                likes: HashSet::new(),
                dislikes: HashSet::new(),
            };

            let mut images = Vec::with_capacity(image_paths.len());
            for image_path in image_paths {
                let image = BlogImage {
                    id: next_id(&mut tables.sequences.image),
                    post: post.id,
                    image: image_path,
                };
                tables.images.insert(image.id, image.clone());
                images.push(image);
            }
            tables.posts.insert(post.id, post.clone());

            Ok((post, images))
        })
        .await
    }

    /// Returns the updated post and the cover image it replaced, if any.
    pub async fn update_post(
        &self,
        post_id: PostID,
        changes: PostChanges,
    ) -> Result<(Post, Option<String>)> {
        self.mutate(|tables| {
            let post = tables.posts.get_mut(&post_id).ok_or(Error::NotFound)?;

            post.title = changes.title;
            post.content = changes.content;
            post.category = changes.category;
            let replaced_image = match changes.image {
                Some(image) => post.image.replace(image),
                None => None,
            };

            Ok((post.clone(), replaced_image))
        })
        .await
    }

    /// Removes the post with its images and comments.
    pub async fn delete_post(&self, post_id: PostID) -> Result<(Post, Vec<BlogImage>)> {
        self.mutate(|tables| {
            let post = tables.posts.remove(&post_id).ok_or(Error::NotFound)?;

            let mut images = Vec::new();
            tables.images.retain(|_, image| {
                if image.post == post_id {
                    images.push(image.clone());
                    false
                } else {
                    true
                }
            });
            tables.comments.retain(|_, comment| comment.post != post_id);

            Ok((post, images))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::new_post;

    #[tokio::test]
    async fn latest_first_orders_by_date_then_id() {
        let store = Store::in_memory();
        for title in ["one", "two", "three"] {
            store.create_post(new_post(title, "body"), vec![]).await.unwrap();
        }

        let titles = store
            .posts_latest_first()
            .await
            .into_iter()
            .map(|post| post.title)
            .collect::<Vec<_>>();

        assert_eq!(titles, ["three", "two", "one"]);
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let store = Store::in_memory();
        assert!(matches!(store.find_post(42).await, Err(Error::NotFound)));
        assert!(matches!(store.delete_post(42).await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn substring_search_ignores_case_across_title_and_content() {
        let store = Store::in_memory();
        store.create_post(new_post("Rust Tips", "x"), vec![]).await.unwrap();
        store.create_post(new_post("Cooking", "I love RUSTIC bread"), vec![]).await.unwrap();
        store.create_post(new_post("Other", "nothing"), vec![]).await.unwrap();

        let found = store.find_posts_by_title_or_content_containing("rust").await;
        let titles = found.iter().map(|post| post.title.as_str()).collect::<Vec<_>>();

        assert_eq!(titles, ["Rust Tips", "Cooking"]);
    }

    #[tokio::test]
    async fn update_keeps_date_and_reports_replaced_cover() {
        let store = Store::in_memory();
        let mut first = new_post("before", "body");
        first.image = Some("post_images/old.png".into());
        let (post, _) = store.create_post(first, vec![]).await.unwrap();

        let (updated, replaced) = store
            .update_post(
                post.id,
                PostChanges {
                    title: "after".into(),
                    content: "new body".into(),
                    category: None,
                    image: Some("post_images/new.png".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.date_posted, post.date_posted);
        assert_eq!(updated.image.as_deref(), Some("post_images/new.png"));
        assert_eq!(replaced.as_deref(), Some("post_images/old.png"));
    }

    #[tokio::test]
    async fn delete_cascades_to_images_and_comments() {
        let store = Store::in_memory();
        let (post, _) = store
            .create_post(new_post("doomed", "body"), vec!["blog_images/a.png".into()])
            .await
            .unwrap();
        store.add_comment(post.id, "bob", "nice").await.unwrap();

        let (_, images) = store.delete_post(post.id).await.unwrap();

        assert_eq!(images.len(), 1);
        assert!(store.images_for_post(post.id).await.is_empty());
        assert!(store.comments_for_post(post.id).await.is_empty());
    }
}
