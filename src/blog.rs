use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;

pub type PostID = u64;
pub type CategoryID = u64;
pub type ImageID = u64;
pub type CommentID = u64;
pub type Username = String;
pub type SessionID = String;

pub const SESSION_ID_BYTES: usize = 32;
pub const MEDIA_KEY_BYTES: usize = 16;

pub const POSTS_PER_PAGE: usize = 6;
pub const TEASER_CHARS: usize = 100;
pub const TITLE_MAX_CHARS: usize = 100;

/// Shown in place of the author for posts whose author no longer exists.
pub const ANONYMOUS_AUTHOR: &str = "Bloga🖊📝";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: Username,
    /// argon2 PHC string
    pub password_hash: String,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryID,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostID,
    pub title: String,
    pub content: String,
    pub author: Option<Username>,
    pub date_posted: chrono::DateTime<chrono::Utc>,
    pub category: Option<CategoryID>,
    /// media path of the cover image
    pub image: Option<String>,

    #[serde(default)]
    pub likes: HashSet<Username>,
    #[serde(default)]
    pub dislikes: HashSet<Username>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogImage {
    pub id: ImageID,
    pub post: PostID,
    /// media path of the stored thumbnail
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentID,
    pub post: PostID,
    pub author: Username,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Post {
    pub fn teaser(&self) -> String {
        let mut chars = self.content.char_indices();
        match chars.nth(TEASER_CHARS) {
            Some((cut, _)) => format!("{}…", &self.content[..cut]),
            None => self.content.clone(),
        }
    }

    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or(ANONYMOUS_AUTHOR)
    }

    pub fn is_authored_by(&self, username: &str) -> bool {
        self.author.as_deref() == Some(username)
    }

    pub fn formatted_date(&self) -> String {
        self.date_posted.format(DATE_FORMAT).to_string()
    }

    /// The cover image if there is one, otherwise the first attached image.
    pub fn image_url(&self, images: &[BlogImage]) -> Option<String> {
        self.image
            .as_deref()
            .or_else(|| images.first().map(|image| image.image.as_str()))
            .map(crate::media::url)
    }
}

/// The JSON shape of a post in listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: PostID,
    pub title: String,
    pub author: String,
    pub content: String,
    pub date_posted: String,
    pub image: Option<String>,
    pub teaser: String,
    pub image_url: Option<String>,
    /// Set only when a registered user wrote the post, so pages know whether
    /// there is a profile to link to.
    #[serde(skip)]
    pub author_username: Option<Username>,
}

impl PostSummary {
    pub fn new(post: &Post, images: &[BlogImage]) -> PostSummary {
        PostSummary {
            id: post.id,
            title: post.title.clone(),
            author: post.author_name().to_owned(),
            content: post.content.clone(),
            date_posted: post.formatted_date(),
            image: post.image.as_deref().map(crate::media::url),
            teaser: post.teaser(),
            image_url: post.image_url(images),
            author_username: post.author.clone(),
        }
    }
}

pub fn get_random_hex_string<const LEN: usize>() -> String {
    let mut bytes = [0u8; LEN];
    rand_chacha::ChaCha20Rng::from_entropy().fill_bytes(&mut bytes);

    bytes.iter().fold(String::new(), |mut output, b| {
        let _ = write!(output, "{b:02x}");
        output
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_with_content(content: &str) -> Post {
        Post {
            id: 1,
            title: "title".into(),
            content: content.into(),
            author: None,
            date_posted: chrono::Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap(),
            category: None,
            image: None,
            likes: HashSet::new(),
            dislikes: HashSet::new(),
        }
    }

    #[test]
    fn short_content_is_its_own_teaser() {
        let post = post_with_content("hello there");
        assert_eq!(post.teaser(), "hello there");
    }

    #[test]
    fn teaser_cuts_on_char_boundaries() {
        let content = "é".repeat(TEASER_CHARS + 5);
        let teaser = post_with_content(&content).teaser();

        assert_eq!(teaser.chars().count(), TEASER_CHARS + 1);
        assert!(teaser.ends_with('…'));
    }

    #[test]
    fn summary_falls_back_to_placeholder_author() {
        let post = post_with_content("body");
        let summary = PostSummary::new(&post, &[]);

        assert_eq!(summary.author, ANONYMOUS_AUTHOR);
        assert_eq!(summary.date_posted, "2023-04-05 06:07:08");
        assert_eq!(summary.image, None);
        assert_eq!(summary.image_url, None);
    }

    #[test]
    fn image_url_prefers_cover_then_first_attachment() {
        let mut post = post_with_content("body");
        let images = vec![BlogImage {
            id: 3,
            post: 1,
            image: "blog_images/abc.png".into(),
        }];

        assert_eq!(
            post.image_url(&images).as_deref(),
            Some("/media/blog_images/abc.png")
        );

        post.image = Some("post_images/cover.jpg".into());
        assert_eq!(
            post.image_url(&images).as_deref(),
            Some("/media/post_images/cover.jpg")
        );
    }

    #[test]
    fn random_hex_has_two_chars_per_byte() {
        let hex = get_random_hex_string::<8>();
        assert_eq!(hex.len(), 16);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
