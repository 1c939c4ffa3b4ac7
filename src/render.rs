//! Server-side HTML for the page routes.
//!
//! Templates are compiled into the binary and rendered with HTML
//! autoescaping, so everything but the rendered markdown is escaped.

use crate::blog::{BlogImage, Category, Comment, Post, PostSummary, User, DATE_FORMAT};
use crate::error::Result;
use crate::search::Page;
use axum::response::Html;
use minijinja::{context, Environment};
use serde::Serialize;
use std::sync::OnceLock;

const TEMPLATES: [(&str, &str); 11] = [
    ("base.html", include_str!("../templates/base.html")),
    ("card.html", include_str!("../templates/card.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("search.html", include_str!("../templates/search.html")),
    ("post.html", include_str!("../templates/post.html")),
    ("profile.html", include_str!("../templates/profile.html")),
    ("post_form.html", include_str!("../templates/post_form.html")),
    ("delete.html", include_str!("../templates/delete.html")),
    ("comment_form.html", include_str!("../templates/comment_form.html")),
    ("intro.html", include_str!("../templates/intro.html")),
    ("about.html", include_str!("../templates/about.html")),
];

fn environment() -> &'static Environment<'static> {
    static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("bundled template should parse");
        }
        env
    })
}

fn render<S: Serialize>(name: &str, ctx: S) -> Result<Html<String>> {
    let html = environment().get_template(name)?.render(ctx)?;
    Ok(Html(html))
}

/// Renders markdown with raw HTML stripped.
pub fn markdown(text: &str) -> String {
    comrak::markdown_to_html(text, &comrak::Options::default())
}

fn profile_url(username: &str) -> String {
    format!("/user/{}", urlencoding::encode(username))
}

#[derive(Debug, Serialize)]
struct Card<'a> {
    post: &'a PostSummary,
    /// Placeholder-authored posts have no profile to link to.
    profile_url: Option<String>,
}

fn cards(summaries: &[PostSummary]) -> Vec<Card<'_>> {
    summaries
        .iter()
        .map(|summary| Card {
            post: summary,
            profile_url: summary.author_username.as_deref().map(profile_url),
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct CommentView<'a> {
    author: &'a str,
    created_at: String,
    text: &'a str,
}

pub fn home(page: &Page<'_, PostSummary>) -> Result<Html<String>> {
    render(
        "home.html",
        context! {
            cards => cards(page.items),
            number => page.number,
            num_pages => page.num_pages,
            previous => page.has_previous().then(|| page.number - 1),
            next => page.has_next().then(|| page.number + 1),
        },
    )
}

pub fn search_results(query: &str, results: &[PostSummary]) -> Result<Html<String>> {
    render(
        "search.html",
        context! {
            query,
            cards => cards(results),
        },
    )
}

pub fn post_detail(
    post: &Post,
    category: Option<&Category>,
    images: &[BlogImage],
    comments: &[Comment],
) -> Result<Html<String>> {
    let comments = comments
        .iter()
        .map(|comment| CommentView {
            author: &comment.author,
            created_at: comment.created_at.format(DATE_FORMAT).to_string(),
            text: &comment.text,
        })
        .collect::<Vec<_>>();
    let image_urls = images
        .iter()
        .map(|image| crate::media::url(&image.image))
        .collect::<Vec<_>>();

    render(
        "post.html",
        context! {
            post => context! { id => post.id, title => &post.title },
            author => post.author_name(),
            profile_url => post.author.as_deref().map(profile_url),
            date_posted => post.formatted_date(),
            category => category.map(|category| &category.name),
            cover_url => post.image.as_deref().map(crate::media::url),
            content_html => markdown(&post.content),
            image_urls,
            likes => post.likes.len(),
            dislikes => post.dislikes.len(),
            comments,
        },
    )
}

pub fn profile(user: &User, posts: &[PostSummary]) -> Result<Html<String>> {
    render(
        "profile.html",
        context! {
            username => &user.username,
            date_joined => user.date_joined.format("%Y-%m-%d").to_string(),
            cards => cards(posts),
        },
    )
}

pub fn post_form(action: &str, post: Option<&Post>, categories: &[Category]) -> Result<Html<String>> {
    render(
        "post_form.html",
        context! {
            heading => if post.is_some() { "Edit post" } else { "New post" },
            action,
            title => post.map_or("", |post| post.title.as_str()),
            content => post.map_or("", |post| post.content.as_str()),
            selected_category => post.and_then(|post| post.category),
            title_max_chars => crate::blog::TITLE_MAX_CHARS,
            categories,
        },
    )
}

pub fn delete_confirm(post: &Post) -> Result<Html<String>> {
    render(
        "delete.html",
        context! { post_id => post.id, title => &post.title },
    )
}

pub fn comment_form(post: &Post) -> Result<Html<String>> {
    render(
        "comment_form.html",
        context! { post_id => post.id, title => &post.title },
    )
}

pub fn intro() -> Result<Html<String>> {
    render("intro.html", context! {})
}

pub fn about() -> Result<Html<String>> {
    render("about.html", context! {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn post(author: Option<&str>, title: &str) -> Post {
        Post {
            id: 7,
            title: title.into(),
            content: "**hi**".into(),
            author: author.map(Into::into),
            date_posted: chrono::Utc::now(),
            category: None,
            image: None,
            likes: HashSet::new(),
            dislikes: HashSet::new(),
        }
    }

    #[test]
    fn markdown_drops_raw_html() {
        let html = markdown("**bold** <script>alert(1)</script>");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn static_pages_render_inside_the_layout() {
        assert!(intro().unwrap().0.contains("<h1>Welcome</h1>"));
        assert!(about().unwrap().0.contains("<title>About | Blog</title>"));
    }

    #[test]
    fn user_text_is_escaped_but_markdown_is_not() {
        let post = post(Some("alice"), "<script>alert(1)</script>");
        let comment = Comment {
            id: 1,
            post: post.id,
            author: "bob".into(),
            text: "<b>bold?</b>".into(),
            created_at: chrono::Utc::now(),
        };

        let Html(html) = post_detail(&post, None, &[], &[comment]).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold?&lt;"));
        assert!(html.contains("<strong>hi</strong>"));
    }

    #[test]
    fn only_registered_authors_get_a_profile_link() {
        let written = PostSummary::new(&post(Some("alice"), "mine"), &[]);
        let placeholder = PostSummary::new(&post(None, "nobody's"), &[]);

        let Html(html) = search_results("", &[written, placeholder]).unwrap();

        assert!(html.contains("alice</a>"));
        assert!(html.contains(crate::blog::ANONYMOUS_AUTHOR));
        assert!(!html.contains(&format!("{}</a>", crate::blog::ANONYMOUS_AUTHOR)));
        assert!(html.contains("2 found"));
    }

    #[test]
    fn post_form_marks_the_current_category() {
        let mut editing = post(Some("alice"), "mine");
        editing.category = Some(2);
        let categories = [
            Category { id: 1, name: "food".into() },
            Category { id: 2, name: "travel".into() },
        ];

        let Html(html) = post_form("/post/7/update", Some(&editing), &categories).unwrap();

        assert!(html.contains("<option selected>travel</option>"));
        assert!(html.contains("<option>food</option>"));
        assert!(html.contains("<title>Edit post | Blog</title>"));
    }
}
