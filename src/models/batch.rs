use serde::{Deserialize, Serialize};

use crate::models::record::Category;

/// Maximum URLs kept per category for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCaps {
    pub content: usize,
    pub directory: usize,
    pub image_novel: usize,
}

impl Default for CategoryCaps {
    fn default() -> Self {
        Self {
            content: 3,
            directory: 1,
            image_novel: 1,
        }
    }
}

impl CategoryCaps {
    pub fn cap_for(&self, category: Category) -> usize {
        match category {
            Category::Content => self.content,
            Category::Directory => self.directory,
            Category::ImageNovel => self.image_novel,
        }
    }
}

/// Classified URLs for one key, each list in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBatch {
    pub content: Vec<String>,
    pub directory: Vec<String>,
    pub image_novel: Vec<String>,
}

impl ClassifiedBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Category, url: String) {
        self.list_mut(category).push(url);
    }

    pub fn urls(&self, category: Category) -> &[String] {
        match category {
            Category::Content => &self.content,
            Category::Directory => &self.directory,
            Category::ImageNovel => &self.image_novel,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Content => &mut self.content,
            Category::Directory => &mut self.directory,
            Category::ImageNovel => &mut self.image_novel,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.directory.is_empty() && self.image_novel.is_empty()
    }

    pub fn total(&self) -> usize {
        self.content.len() + self.directory.len() + self.image_novel.len()
    }

    /// True once Content and Directory have both reached their caps.
    pub fn primary_lists_full(&self, caps: &CategoryCaps) -> bool {
        self.content.len() >= caps.content && self.directory.len() >= caps.directory
    }

    /// Keeps the first `cap` URLs of every list that is longer than its cap.
    pub fn truncate_to(&mut self, caps: &CategoryCaps) {
        for category in Category::ALL {
            let cap = caps.cap_for(category);
            let list = self.list_mut(category);
            if list.len() > cap {
                list.truncate(cap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[test]
    fn test_truncate_keeps_first_entries() {
        let mut batch = ClassifiedBatch {
            content: urls("c", 5),
            directory: urls("d", 2),
            image_novel: urls("i", 3),
        };
        batch.truncate_to(&CategoryCaps::default());

        assert_eq!(batch.content, vec!["c1", "c2", "c3"]);
        assert_eq!(batch.directory, vec!["d1"]);
        assert_eq!(batch.image_novel, vec!["i1"]);
    }

    #[test]
    fn test_truncate_leaves_lists_at_or_under_cap() {
        let mut batch = ClassifiedBatch {
            content: urls("c", 3),
            directory: Vec::new(),
            image_novel: urls("i", 1),
        };
        let before = batch.clone();
        batch.truncate_to(&CategoryCaps::default());
        assert_eq!(batch, before);
    }

    #[test]
    fn test_primary_lists_full() {
        let caps = CategoryCaps::default();
        let mut batch = ClassifiedBatch::new();
        for url in urls("c", 3) {
            batch.push(Category::Content, url);
        }
        assert!(!batch.primary_lists_full(&caps));

        batch.push(Category::Directory, "d1".to_string());
        assert!(batch.primary_lists_full(&caps));
        assert_eq!(batch.total(), 4);
    }
}
