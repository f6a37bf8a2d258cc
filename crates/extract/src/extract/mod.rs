//! Main extraction logic for Kindle clippings exports.

mod added_on;
mod record;

use self::record::Record;
use crate::consts;
use crate::error::Result;
use crate::models::Entry;
use exn::ResultExt;
use tracing::instrument;

/// What to do with a record that does not follow the clippings grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum ParsePolicy {
    /// Abort the whole extraction on the first malformed record.
    #[default]
    Strict,
    /// Skip malformed records, logging a warning for each and counting them.
    Lenient,
}

/// The outcome of an extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Entries in export order.
    pub entries: Vec<Entry>,
    /// Number of malformed records dropped under [`ParsePolicy::Lenient`].
    pub skipped: usize,
}
impl From<Extraction> for Vec<Entry> {
    fn from(extraction: Extraction) -> Self {
        extraction.entries
    }
}

/// Splits a clippings export into records and parses each one into an [`Entry`].
///
/// The whole export is held in memory; entries are produced in export order,
/// which carries no meaning for the library built from them.
#[derive(Debug)]
pub struct Extractor<'a> {
    text: &'a str,
    policy: ParsePolicy,
}
impl<'a> Extractor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            // Leading blank lines are kept so that reported line numbers match the file.
            text: text.trim_start_matches(consts::BOM).trim_end(),
            policy: ParsePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parses every record of the export.
    ///
    /// # Errors
    ///
    /// Under [`ParsePolicy::Strict`], returns
    /// [`MalformedRecord`](crate::error::ErrorKind::MalformedRecord) for the
    /// first record that fails to parse, with the field-level cause attached.
    /// No entries are returned in that case.
    #[instrument(skip(self), fields(text_size = self.text.len(), policy = ?self.policy))]
    pub fn extract(&self) -> Result<Extraction> {
        let mut extraction = Extraction::default();
        for record in Record::split(self.text) {
            match record.entry().or_raise(|| record.malformed()) {
                Ok(entry) => extraction.entries.push(entry),
                Err(err) if self.policy == ParsePolicy::Lenient => {
                    tracing::warn!(position = record.position, line = record.line, error = ?err, "Skipping malformed record");
                    extraction.skipped += 1;
                },
                Err(err) => return Err(err),
            }
        }
        tracing::debug!(entries = extraction.entries.len(), skipped = extraction.skipped, "Extracted clippings");
        Ok(extraction)
    }

    /// Parses every record of the export, discarding the skip count.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        self.extract().map(Into::into)
    }
}
