//! Decode boundary hooks.
use log::{debug, warn};

use crate::error::ParserError;
use crate::models::*;

/// Receives notifications at the boundaries of one update's decoding.
///
/// The decoders themselves never log. A [Producer](crate::Producer) reports to its observer
/// instead, and every method defaults to doing nothing.
pub trait DecodeObserver: Send + Sync {
    /// The attribute block of an update was split into attributes.
    fn attributes_decoded(&self, _update: &Update) {}

    /// An attribute failed to decode. Records are still built, without its fields.
    fn attribute_failed(&self, _attr_type: AttrType, _error: &ParserError) {}

    /// An NLRI payload of `family` is about to be decoded.
    fn nlri_started(&self, _family: NlriFamily, _action: Action) {}

    /// An AFI/SAFI pair or BGP-LS NLRI type with no record counterpart was skipped.
    fn skipped(&self, _error: &ParserError) {}

    /// A record was built.
    fn record_built(&self, _record: &Record) {}

    /// Building a record failed. Other records of the same update are unaffected.
    fn record_failed(&self, _error: &ParserError) {}
}

/// Observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}

/// Observer forwarding to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DecodeObserver for LogObserver {
    fn attributes_decoded(&self, update: &Update) {
        debug!(
            "decoded {} attributes: {:?}",
            update.len(),
            update
                .attributes
                .iter()
                .map(|a| a.attr_type)
                .collect::<Vec<_>>()
        );
    }

    fn attribute_failed(&self, attr_type: AttrType, error: &ParserError) {
        warn!("ignoring attribute {:?}: {}", attr_type, error);
    }

    fn nlri_started(&self, family: NlriFamily, action: Action) {
        debug!("decoding {:?} NLRI, action {}", family, action);
    }

    fn skipped(&self, error: &ParserError) {
        warn!("skipping NLRI: {}", error);
    }

    fn record_built(&self, record: &Record) {
        debug!("built {} record", record.kind());
    }

    fn record_failed(&self, error: &ParserError) {
        warn!("failed to build record: {}", error);
    }
}
