use async_trait::async_trait;

use crate::error::Result;

/// Source of raw search responses, one call per key.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the response body for `key`. Implementations must not retry.
    async fn fetch(&self, key: &str) -> Result<String>;
    fn name(&self) -> &str;
}
