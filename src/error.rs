/*!
error module defines the error types used in bmp-ls-parser.
*/
use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// A declared length runs past the bytes that are actually available.
    ///
    /// ## Occurs during:
    ///  - Reading attribute headers and values
    ///  - Walking BGP-LS TLVs and sub-TLVs
    ///  - Reading NLRI prefix entries
    #[error("truncated input reading {context}: need {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },
    /// A field is present but internally inconsistent, e.g. a SID TLV too short to hold its
    /// fixed header or a prefix length wider than its address family.
    #[error("malformed field: {0}")]
    MalformedField(String),
    /// An AFI/SAFI pair or BGP-LS NLRI type that this crate does not decode.
    #[error("unsupported {family} sub-type {code}")]
    UnsupportedSubType { family: &'static str, code: u32 },
    /// A record builder could not find a descriptor it cannot do without.
    #[error("missing required descriptor: {0}")]
    MissingRequiredDescriptor(&'static str),
    /// This error represents a [num_enum::TryFromPrimitiveError] error for any of a number of
    /// different types.
    #[error("unrecognized value {value} for {type_name}")]
    UnrecognizedEnumVariant { type_name: &'static str, value: u64 },
}

impl ParserError {
    /// Returns true for errors that callers should log and skip rather than report.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParserError::UnsupportedSubType { .. })
    }
}

impl<T> From<TryFromPrimitiveError<T>> for ParserError
where
    T: TryFromPrimitive,
    T::Primitive: Into<u64>,
{
    #[inline]
    fn from(value: TryFromPrimitiveError<T>) -> Self {
        ParserError::UnrecognizedEnumVariant {
            type_name: T::NAME,
            value: value.number.into(),
        }
    }
}
