pub mod parser;
pub mod classifier;

pub use parser::{ParseMode, RawRecord, RecordIter};
pub use classifier::{Classification, Classifier, DiscardCounts, ScanMode};
