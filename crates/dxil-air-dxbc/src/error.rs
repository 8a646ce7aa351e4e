use thiserror::Error;

/// Errors produced while parsing a `DXBC` container or one of its parts.
///
/// Each variant carries a human-readable description of what was wrong and
/// where; [`DxbcError::context`] returns it without the category prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DxbcError {
    /// The fixed container header is truncated or inconsistent.
    #[error("malformed DXBC header: {0}")]
    MalformedHeader(String),
    /// The chunk offset table (or an entry in it) is inconsistent.
    #[error("malformed DXBC chunk offsets: {0}")]
    MalformedOffsets(String),
    /// A declared size or offset points outside the container.
    #[error("DXBC data out of bounds: {0}")]
    OutOfBounds(String),
    /// A chunk payload failed to parse.
    #[error("invalid DXBC chunk: {0}")]
    InvalidChunk(String),
}

impl DxbcError {
    pub(crate) fn malformed_header(msg: impl Into<String>) -> Self {
        Self::MalformedHeader(msg.into())
    }

    pub(crate) fn malformed_offsets(msg: impl Into<String>) -> Self {
        Self::MalformedOffsets(msg.into())
    }

    pub(crate) fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    pub(crate) fn invalid_chunk(msg: impl Into<String>) -> Self {
        Self::InvalidChunk(msg.into())
    }

    /// Returns the error detail without the category prefix.
    pub fn context(&self) -> &str {
        match self {
            Self::MalformedHeader(msg)
            | Self::MalformedOffsets(msg)
            | Self::OutOfBounds(msg)
            | Self::InvalidChunk(msg) => msg,
        }
    }
}
