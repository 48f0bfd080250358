use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{Category, ClassifiedBatch};

/// Append-only destination for classified URLs.
pub trait SinkWriter {
    /// Appends `urls` to the sink for `category`, one per line.
    fn append(&mut self, category: Category, urls: &[String]) -> Result<()>;

    /// Appends every non-empty list of `batch` to its sink, in Content, Directory,
    /// ImageNovel order.
    fn write_batch(&mut self, batch: &ClassifiedBatch) -> Result<()> {
        for category in Category::ALL {
            let urls = batch.urls(category);
            if !urls.is_empty() {
                self.append(category, urls)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkNames {
    pub content: String,
    pub directory: String,
    pub image_novel: String,
}

impl Default for SinkNames {
    fn default() -> Self {
        Self {
            content: "contentUrl.txt".to_string(),
            directory: "directoryUrl.txt".to_string(),
            image_novel: "imageNovelUrl.txt".to_string(),
        }
    }
}

impl SinkNames {
    pub fn name_for(&self, category: Category) -> &str {
        match category {
            Category::Content => &self.content,
            Category::Directory => &self.directory,
            Category::ImageNovel => &self.image_novel,
        }
    }
}

/// One text file per category inside an output directory.
///
/// Files are opened in append mode for each write and only created on the first
/// non-empty append.
pub struct FileSinks {
    dir: PathBuf,
    names: SinkNames,
}

impl FileSinks {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::with_names(dir, SinkNames::default())
    }

    pub fn with_names<P: AsRef<Path>>(dir: P, names: SinkNames) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| Error::SinkWrite {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, names })
    }

    pub fn path_for(&self, category: Category) -> PathBuf {
        self.dir.join(self.names.name_for(category))
    }
}

impl SinkWriter for FileSinks {
    fn append(&mut self, category: Category, urls: &[String]) -> Result<()> {
        if urls.is_empty() {
            return Ok(());
        }

        let path = self.path_for(category);
        let mut payload = urls.join("\n");
        payload.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::SinkWrite {
                path: path.clone(),
                source,
            })?;
        file.write_all(payload.as_bytes())
            .map_err(|source| Error::SinkWrite {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Appended {} URLs to {}", urls.len(), path.display());
        Ok(())
    }
}

/// In-process sinks, for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySinks {
    written: HashMap<Category, Vec<String>>,
    appends: usize,
    fail_writes: bool,
}

impl MemorySinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sinks whose every append fails, as a full disk would.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn lines(&self, category: Category) -> &[String] {
        self.written
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of non-empty appends received.
    pub fn appends(&self) -> usize {
        self.appends
    }
}

impl SinkWriter for MemorySinks {
    fn append(&mut self, category: Category, urls: &[String]) -> Result<()> {
        if urls.is_empty() {
            return Ok(());
        }
        if self.fail_writes {
            return Err(Error::SinkWrite {
                path: PathBuf::from(category.to_string()),
                source: std::io::Error::new(std::io::ErrorKind::Other, "sink rejected write"),
            });
        }
        self.appends += 1;
        self.written
            .entry(category)
            .or_default()
            .extend(urls.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_sinks_append_across_runs() {
        let dir = tempfile::tempdir().unwrap();

        let mut sinks = FileSinks::new(dir.path()).unwrap();
        sinks.append(Category::Content, &strings(&["a", "b"])).unwrap();
        drop(sinks);

        let mut sinks = FileSinks::new(dir.path()).unwrap();
        sinks.append(Category::Content, &strings(&["c"])).unwrap();

        let content = fs::read_to_string(dir.path().join("contentUrl.txt")).unwrap();
        assert_eq!(content, "a\nb\nc\n");
    }

    #[test]
    fn test_empty_lists_create_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sinks = FileSinks::new(dir.path()).unwrap();

        let batch = ClassifiedBatch {
            content: strings(&["c1"]),
            directory: Vec::new(),
            image_novel: Vec::new(),
        };
        sinks.write_batch(&batch).unwrap();

        assert!(sinks.path_for(Category::Content).exists());
        assert!(!sinks.path_for(Category::Directory).exists());
        assert!(!sinks.path_for(Category::ImageNovel).exists());
    }

    #[test]
    fn test_unwritable_sink_is_sink_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let names = SinkNames {
            content: "missing/contentUrl.txt".to_string(),
            ..SinkNames::default()
        };
        let mut sinks = FileSinks::with_names(dir.path(), names).unwrap();

        let err = sinks
            .append(Category::Content, &strings(&["c1"]))
            .unwrap_err();
        assert!(matches!(err, Error::SinkWrite { .. }));
    }

    #[test]
    fn test_memory_sinks() {
        let mut sinks = MemorySinks::new();
        sinks.append(Category::Directory, &strings(&["d1"])).unwrap();
        sinks.append(Category::Directory, &[]).unwrap();
        assert_eq!(sinks.lines(Category::Directory), strings(&["d1"]).as_slice());
        assert_eq!(sinks.appends(), 1);

        let mut failing = MemorySinks::failing();
        assert!(failing.append(Category::Content, &strings(&["c1"])).is_err());
    }
}
