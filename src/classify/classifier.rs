use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::parser::{ParseMode, RawRecord, RecordIter};
use crate::error::{Error, Result};
use crate::models::{CategoryCaps, ClassifiedBatch};

/// Whether scanning stops once Content and Directory are full.
///
/// `EarlyExit` abandons any ImageNovel URLs that appear after that point. `Full` reads the
/// whole response before truncating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    #[default]
    EarlyExit,
    Full,
}

impl FromStr for ScanMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "early-exit" | "early_exit" | "early" => Ok(ScanMode::EarlyExit),
            "full" => Ok(ScanMode::Full),
            other => Err(Error::Config(format!(
                "unknown scan mode {:?} (expected early-exit or full)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::EarlyExit => write!(f, "early-exit"),
            ScanMode::Full => write!(f, "full"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardCounts {
    pub malformed: usize,
    pub suppressed: usize,
    pub unclassified: usize,
}

impl DiscardCounts {
    pub fn total(&self) -> usize {
        self.malformed + self.suppressed + self.unclassified
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub batch: ClassifiedBatch,
    pub discarded: DiscardCounts,
    /// Set when scanning stopped before the end of the body.
    pub stopped_early: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    caps: CategoryCaps,
    scan_mode: ScanMode,
    parse_mode: ParseMode,
}

impl Classifier {
    pub fn new(caps: CategoryCaps, scan_mode: ScanMode, parse_mode: ParseMode) -> Self {
        Self {
            caps,
            scan_mode,
            parse_mode,
        }
    }

    /// Sorts a response body into capped per-category URL lists.
    ///
    /// Pure: the same body always gives the same result. Only `ParseMode::Strict` can fail.
    pub fn classify(&self, body: &str) -> Result<Classification> {
        let mut result = Classification::default();

        for (index, raw) in RecordIter::new(body).enumerate() {
            match raw {
                RawRecord::Malformed(chunk) => {
                    if self.parse_mode == ParseMode::Strict {
                        return Err(Error::MalformedRecord {
                            index,
                            record: chunk.to_string(),
                        });
                    }
                    result.discarded.malformed += 1;
                }
                RawRecord::Valid(record) if record.is_suppressed() => {
                    result.discarded.suppressed += 1;
                }
                RawRecord::Valid(record) => match record.category() {
                    Some(category) => result.batch.push(category, record.url),
                    None => {
                        if self.parse_mode == ParseMode::Strict {
                            return Err(Error::MalformedRecord {
                                index,
                                record: format!("{},{}", record.url, record.level_flag),
                            });
                        }
                        result.discarded.unclassified += 1;
                    }
                },
            }

            // Checked after every record, discarded ones included.
            if self.scan_mode == ScanMode::EarlyExit && result.batch.primary_lists_full(&self.caps)
            {
                result.stopped_early = true;
                break;
            }
        }

        result.batch.truncate_to(&self.caps);
        Ok(result)
    }
}
