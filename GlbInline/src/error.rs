//! Error types for `GlbInline`

use std::path::PathBuf;

use thiserror::Error;

use crate::glb::ChunkType;

/// The error type for `GlbInline` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Errors ====================
    /// The buffer does not start with the `glTF` signature.
    #[error("invalid GLB magic: expected glTF, found {found:?}")]
    InvalidGlbMagic {
        /// The four bytes found at offset 0.
        found: [u8; 4],
    },

    /// The header declares a total length shorter than the supplied buffer.
    #[error("GLB header declares {declared} bytes but buffer holds {actual}")]
    TotalLengthMismatch {
        /// The total length field from the header.
        declared: u32,
        /// The actual size of the supplied buffer.
        actual: usize,
    },

    /// A chunk header carries the wrong type code.
    #[error("expected {expected} chunk at offset {offset}, found type 0x{found:08X}")]
    UnexpectedChunkType {
        /// Byte offset of the offending chunk header.
        offset: usize,
        /// The chunk type required at this position.
        expected: ChunkType,
        /// The raw type code that was read.
        found: u32,
    },

    /// A declared length or offset would read past the end of the buffer.
    #[error("truncated input: {what} needs {length} bytes at offset {offset}, only {available} available")]
    TruncatedInput {
        /// What was being read.
        what: &'static str,
        /// Byte offset the read starts at.
        offset: usize,
        /// Number of bytes requested.
        length: usize,
        /// Number of bytes available from `offset`.
        available: usize,
    },

    /// The JSON chunk does not decode into a glTF document.
    #[error("malformed glTF JSON: {message}")]
    MalformedJson {
        /// Description of the decode failure.
        message: String,
    },

    // ==================== Relocation Errors ====================
    /// An image references buffer data this rewriter cannot resolve.
    #[error("image {image}: unsupported buffer reference: {message}")]
    UnsupportedBuffer {
        /// Index of the image entry in `images`.
        image: usize,
        /// Why the reference cannot be resolved.
        message: String,
    },

    // ==================== Output Errors ====================
    /// The rewritten container would not fit the 32-bit length fields.
    #[error("output container too large: {length} bytes")]
    ContainerTooLarge {
        /// The length that overflowed.
        length: usize,
    },

    // ==================== File System / Config Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Output file already exists and overwriting was not requested.
    #[error("output already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// Options could not be loaded.
    #[error("invalid options: {message}")]
    InvalidOptions {
        /// The parse or validation error message.
        message: String,
    },
}

/// Coarse classification of [`Error`] values.
///
/// Callers that only care about the failure class (for example to decide
/// whether a re-fetch could help) match on this instead of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Header signature or container framing is wrong.
    Format,
    /// A required chunk type code was not found.
    ChunkType,
    /// A declared length points past the end of the input.
    TruncatedInput,
    /// The JSON chunk is not a usable glTF document.
    MalformedJson,
    /// An image references an unsupported or missing buffer.
    UnsupportedBuffer,
    /// Reading or writing files failed.
    Io,
    /// Options or paths supplied by the caller are invalid.
    Config,
}

impl Error {
    /// The failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidGlbMagic { .. }
            | Error::TotalLengthMismatch { .. }
            | Error::ContainerTooLarge { .. } => ErrorKind::Format,
            Error::UnexpectedChunkType { .. } => ErrorKind::ChunkType,
            Error::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Error::MalformedJson { .. } => ErrorKind::MalformedJson,
            Error::UnsupportedBuffer { .. } => ErrorKind::UnsupportedBuffer,
            Error::Io(_) => ErrorKind::Io,
            Error::InvalidPath(_) | Error::OutputExists(_) | Error::InvalidOptions { .. } => {
                ErrorKind::Config
            }
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedJson {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(image: usize, message: impl Into<String>) -> Self {
        Error::UnsupportedBuffer {
            image,
            message: message.into(),
        }
    }
}

/// A specialized Result type for `GlbInline` operations.
pub type Result<T> = std::result::Result<T, Error>;
