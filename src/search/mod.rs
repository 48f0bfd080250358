pub mod request;
pub mod fetcher;
pub mod client;

pub use request::{build_request_url, DEFAULT_BASE_URL};
pub use fetcher::Fetcher;
pub use client::SearchClient;
