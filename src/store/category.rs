use super::{next_id, Store, Tables};
use crate::blog::{Category, CategoryID};
use crate::error::{Error, Result};

pub(super) fn find_by_name<'a>(tables: &'a Tables, name: &str) -> Option<&'a Category> {
    let name = name.to_lowercase();
    tables
        .categories
        .values()
        .find(|category| category.name.to_lowercase() == name)
}

impl Store {
    pub async fn categories(&self) -> Vec<Category> {
        self.tables
            .read()
            .await
            .categories
            .values()
            .cloned()
            .collect()
    }

    pub async fn find_category(&self, category_id: CategoryID) -> Option<Category> {
        self.tables
            .read()
            .await
            .categories
            .get(&category_id)
            .cloned()
    }

    pub async fn find_category_by_name(&self, name: &str) -> Option<Category> {
        find_by_name(&*self.tables.read().await, name).cloned()
    }

    /// Names are unique ignoring case, so `"Rust"` finds an existing `"rust"`.
    pub async fn get_or_create_category(&self, name: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("category name must not be blank".into()));
        }

        self.mutate(|tables| {
            if let Some(existing) = find_by_name(tables, name) {
                return Ok(existing.clone());
            }

            let category = Category {
                id: next_id(&mut tables.sequences.category),
                name: name.to_owned(),
            };
            tables.categories.insert(category.id, category.clone());
            tracing::info!(category = %category.name, "created category");

            Ok(category)
        })
        .await
    }
}
