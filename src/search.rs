use crate::blog::Post;
use crate::store::Store;

/// An empty query lists everything, newest first. Otherwise a query naming a
/// category (ignoring case) lists that category, and anything else is matched
/// as a substring of titles and contents.
pub async fn search(store: &Store, query: &str) -> Vec<Post> {
    if query.is_empty() {
        return store.posts_latest_first().await;
    }

    match store.find_posts_by_category_name(query).await {
        Some(posts) => posts,
        None => store.find_posts_by_title_or_content_containing(query).await,
    }
}

/// A missing or non-integer page means the first page. Integers below 1 map
/// to 0, which [`Paginator::page`] answers with an empty page.
pub fn page_number(raw: Option<&str>) -> usize {
    match raw.map(|raw| raw.trim().parse::<i64>()) {
        Some(Ok(number)) if number < 1 => 0,
        Some(Ok(number)) => usize::try_from(number).unwrap_or(usize::MAX),
        Some(Err(_)) | None => 1,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    pub per_page: usize,
}

#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub num_pages: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Paginator {
        Paginator {
            per_page: per_page.max(1),
        }
    }

    /// An empty listing still has one (empty) page.
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    /// Pages are 1-based; a page past the end is empty.
    pub fn page<'a, T>(&self, items: &'a [T], number: usize) -> Page<'a, T> {
        let num_pages = self.num_pages(items.len());
        let start = number.saturating_sub(1).saturating_mul(self.per_page);
        let items = if number == 0 || start >= items.len() {
            &items[..0]
        } else {
            &items[start..(start + self.per_page).min(items.len())]
        };

        Page {
            items,
            number,
            num_pages,
        }
    }
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}
