use std::fmt;

use thiserror::Error;

pub use color_eyre::eyre::eyre;

/// The part of a row packet being decoded or encoded when an error occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStage {
    Header,
    RowMarker,
    NullBitmap,
    Column { index: usize, name: String },
}

impl fmt::Display for RowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("packet header"),
            Self::RowMarker => f.write_str("row marker"),
            Self::NullBitmap => f.write_str("NULL bitmap"),
            Self::Column { index, name } => write!(f, "column #{index} ({name})"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed binary row packet")]
    MalformedRowPacket,

    #[error("malformed {0} value")]
    MalformedValue(&'static str),

    #[error("unexpected end of buffer")]
    UnexpectedEof,

    #[error("invalid length-encoded integer prefix: 0x{0:02X}")]
    InvalidLengthPrefix(u8),

    #[error("unsupported column type: 0x{0:02X}")]
    UnsupportedColumnType(u8),

    #[error("invalid value type for {0} field")]
    InvalidValueType(&'static str),

    #[error("failed to parse {kind} string {text:?}")]
    InvalidTemporal { kind: &'static str, text: String },

    #[error("no value for non-NULL column")]
    MissingValue,

    #[error("expected {expected} columns, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("failed to decode {stage} at offset {offset}: {source}")]
    Decode {
        offset: usize,
        stage: RowStage,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to write {stage}: {source}")]
    Encode {
        stage: RowStage,
        #[source]
        source: Box<Error>,
    },

    #[error("Bad config error: {0}")]
    BadConfigError(String),

    #[error("Library bug: {0}")]
    LibraryBug(color_eyre::Report),
}

impl Error {
    pub(crate) fn decoding(self, offset: usize, stage: RowStage) -> Self {
        Error::Decode {
            offset,
            stage,
            source: Box::new(self),
        }
    }

    pub(crate) fn encoding(self, stage: RowStage) -> Self {
        Error::Encode {
            stage,
            source: Box::new(self),
        }
    }

    /// Byte offset reached before a decode failure, if this is a decode error
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Decode { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// The innermost error with decode/encode context stripped
    pub fn root(&self) -> &Error {
        match self {
            Error::Decode { source, .. } | Error::Encode { source, .. } => source.root(),
            other => other,
        }
    }
}

impl<A, S, V> From<zerocopy::ConvertError<A, S, V>> for Error {
    fn from(err: zerocopy::ConvertError<A, S, V>) -> Self {
        match err {
            zerocopy::ConvertError::Size(_) => Error::UnexpectedEof,
            zerocopy::ConvertError::Alignment(_) | zerocopy::ConvertError::Validity(_) => {
                Error::LibraryBug(eyre!("unexpected zerocopy conversion failure"))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
