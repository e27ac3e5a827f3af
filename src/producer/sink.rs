use std::convert::Infallible;

use crate::models::{Record, RecordKind};

/// Destination for built records, e.g. a message bus topic per [RecordKind].
pub trait PublishSink {
    type Error;

    fn publish(&mut self, record: &Record, kind: RecordKind, key: &[u8]) -> Result<(), Self::Error>;
}

/// One record as a [Vec] sink received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub kind: RecordKind,
    pub key: Vec<u8>,
    pub record: Record,
}

impl PublishSink for Vec<Published> {
    type Error = Infallible;

    fn publish(&mut self, record: &Record, kind: RecordKind, key: &[u8]) -> Result<(), Infallible> {
        self.push(Published {
            kind,
            key: key.to_vec(),
            record: record.clone(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub published: usize,
    /// Entries that produced an error instead of a record.
    pub failed: usize,
}
