use serde::{Deserialize, Serialize};

use crate::models::Record;

pub const RECORD_DELIMITER: char = '^';
pub const FIELD_DELIMITER: char = ',';

/// What to do with records that do not fit the `url,level` grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Drop bad records and count them.
    #[default]
    BestEffort,
    /// Fail the key on the first bad record.
    Strict,
}

/// One `^`-separated chunk of a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord<'a> {
    Valid(Record),
    /// Did not split into exactly two fields.
    Malformed(&'a str),
}

/// Lazily walks the records of a response body in order.
///
/// An empty body yields nothing. Fields are taken verbatim: no trimming, no URL validation.
pub struct RecordIter<'a> {
    chunks: Option<std::str::Split<'a, char>>,
}

impl<'a> RecordIter<'a> {
    pub fn new(body: &'a str) -> Self {
        let chunks = if body.is_empty() {
            None
        } else {
            Some(body.split(RECORD_DELIMITER))
        };
        Self { chunks }
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunks.as_mut()?.next()?;
        let mut fields = chunk.split(FIELD_DELIMITER);
        let record = match (fields.next(), fields.next(), fields.next()) {
            (Some(url), Some(flag), None) => RawRecord::Valid(Record::new(url, flag)),
            _ => RawRecord::Malformed(chunk),
        };
        Some(record)
    }
}
