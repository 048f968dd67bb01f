use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Broad category of a [`SeisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied argument violates a precondition. Nothing was mutated.
    InvalidInput,
    /// A well formed query matched no data.
    NotFound,
    /// The bytes being decoded violate the structure of the format.
    MalformedData,
    /// A value was requested before it was set or read.
    NotSet,
    /// The operating system failed a read or write, e.g. a full disk.
    Io,
}

#[derive(Error, Debug)]
pub enum SeisError {
    #[error("IO Error")]
    IOError(#[from] std::io::Error),
    #[error("File `{0}` does not exist")]
    FileNotFound(PathBuf),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Could not find `{0}`")]
    NotFound(String),
    #[error("{0} was never set")]
    NotSet(String),
    #[error("Requested {requested} samples but the trace holds {actual} samples")]
    WrongPrecision {
        requested: &'static str,
        actual: &'static str,
    },
    #[error("Insufficient bytes, {0} < required size {1}")]
    InsufficientBytes(usize, usize),
    #[error("Text not UTF8")]
    FromUtf8Error(#[from] FromUtf8Error),
    #[error("Cannot determine byte order: {0}")]
    UnknownByteOrder(String),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(String),
    #[error("Unknown {0} code: {1}")]
    UnknownCode(&'static str, i64),
    #[error("Unsupported SEG-Y data format code: {0}")]
    UnsupportedDataFormat(u16),
    #[error("No miniSEED record at byte offset {0}: {1}")]
    BadRecord(usize, String),
    #[error("CRC invalid for record: calc:{0:#X} header:{1:#X}")]
    CrcInvalid(u32, u32),
    #[error("cannot parse {1} in FDSN source identifier `{0}`")]
    IdentifierParse(String, String),
    #[error("Unknown data encoding: `{0}`")]
    UnknownEncoding(u8),
    #[error("Data encoding `{0}` cannot be unpacked into samples")]
    UnsupportedEncoding(String),
    #[error("Expected {0} bytes for {1} samples as encoding type {2} but record has {3} data bytes.")]
    DataLength(usize, usize, u8, usize),
    #[error("Steim compression/decompression error: `{0}`")]
    Compression(String),
    #[error("Unpacked {0} samples but expected {1}")]
    SampleCount(usize, usize),
    #[error("Header claims {0} samples but {1} data bytes hold at most {2}")]
    TooManySamples(usize, usize, usize),
    #[error("Sampling rate {0} must be positive")]
    SamplingRate(f64),
}

impl SeisError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeisError::IOError(e) => match e.kind() {
                std::io::ErrorKind::NotFound
                | std::io::ErrorKind::PermissionDenied
                | std::io::ErrorKind::InvalidInput => ErrorKind::InvalidInput,
                std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::InvalidData => {
                    ErrorKind::MalformedData
                }
                _ => ErrorKind::Io,
            },
            SeisError::FileNotFound(_)
            | SeisError::InvalidArgument(_)
            | SeisError::WrongPrecision { .. } => ErrorKind::InvalidInput,
            SeisError::NotFound(_) => ErrorKind::NotFound,
            SeisError::NotSet(_) => ErrorKind::NotSet,
            SeisError::InsufficientBytes(..)
            | SeisError::FromUtf8Error(_)
            | SeisError::UnknownByteOrder(_)
            | SeisError::InvalidHeaderValue(_)
            | SeisError::UnknownCode(..)
            | SeisError::UnsupportedDataFormat(_)
            | SeisError::BadRecord(..)
            | SeisError::CrcInvalid(..)
            | SeisError::IdentifierParse(..)
            | SeisError::UnknownEncoding(_)
            | SeisError::UnsupportedEncoding(_)
            | SeisError::DataLength(..)
            | SeisError::Compression(_)
            | SeisError::SampleCount(..)
            | SeisError::TooManySamples(..)
            | SeisError::SamplingRate(_) => ErrorKind::MalformedData,
        }
    }

    /// Re-labels a setter rejection as malformed data. Used when a value that
    /// failed validation came out of a file rather than from the caller.
    pub(crate) fn into_malformed(self) -> SeisError {
        match self {
            SeisError::InvalidArgument(msg) => SeisError::InvalidHeaderValue(msg),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeisError>;
