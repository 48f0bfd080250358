pub mod config;
pub mod error;
pub mod models;
pub mod keys;
pub mod search;
pub mod classify;
pub mod crawl;
pub mod storage;

pub use config::{Config, ConfigOverrides, PipelineConfig};
pub use error::{Error, Result};
pub use search::{Fetcher, SearchClient};
pub use classify::{Classifier, ParseMode, ScanMode};
pub use crawl::CrawlPipeline;
pub use storage::{FileSinks, SinkWriter};
