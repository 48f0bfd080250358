pub mod sinks;

pub use sinks::{FileSinks, MemorySinks, SinkNames, SinkWriter};
