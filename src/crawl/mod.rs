pub mod pipeline;

pub use pipeline::CrawlPipeline;
