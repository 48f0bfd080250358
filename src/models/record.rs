use serde::{Deserialize, Serialize};

/// Level flag the search endpoint uses to mark a URL as not worth keeping.
pub const SUPPRESSED_FLAG: &str = "-1";

/// One `url,level` pair from a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    pub level_flag: String,
}

impl Record {
    pub fn new(url: impl Into<String>, level_flag: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            level_flag: level_flag.into(),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.level_flag == SUPPRESSED_FLAG
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_flag(&self.level_flag)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// Chapter text pages (`1`).
    Content,
    /// Table-of-contents pages (`3`).
    Directory,
    /// Novels published as scanned images (`2`).
    ImageNovel,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Content, Category::Directory, Category::ImageNovel];

    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "1" => Some(Category::Content),
            "3" => Some(Category::Directory),
            "2" => Some(Category::ImageNovel),
            _ => None,
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Category::Content => "1",
            Category::Directory => "3",
            Category::ImageNovel => "2",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Content => write!(f, "Content"),
            Category::Directory => write!(f, "Directory"),
            Category::ImageNovel => write!(f, "ImageNovel"),
        }
    }
}
