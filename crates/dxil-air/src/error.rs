use dxil_air_dxbc::{DxbcError, FourCC, ShaderModel, ShaderStage};
use thiserror::Error;

/// Why [`crate::DxilToAir::try_load`] refused a blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The blob has no bytes.
    #[error("shader blob is empty")]
    Empty,
    /// The blob is over [`crate::ConverterConfig::max_blob_bytes`].
    #[error("shader blob length {len} exceeds maximum {max} bytes")]
    TooLarge {
        /// Length of the refused blob.
        len: usize,
        /// The configured cap.
        max: usize,
    },
    /// The blob is not a well-formed DXBC container.
    #[error("dxbc error: {0}")]
    Container(#[from] DxbcError),
    /// The header checksum differs from the structural MD5 of the container.
    #[error("DXBC checksum is not the structural MD5 of the container (checksum field zeroed)")]
    StructuralMd5Mismatch,
    /// The container carries SM4/SM5 bytecode instead of DXIL.
    #[error("DXBC container holds {0} SM4/SM5 bytecode, not DXIL")]
    LegacyBytecode(FourCC),
    /// The container has neither a `DXIL` nor an `ILDB` part.
    #[error("DXBC container has no DXIL part (expected DXIL or ILDB)")]
    MissingDxil,
    /// The DXIL part's program header is malformed.
    #[error("malformed DXIL program: {0}")]
    Program(DxbcError),
    /// The DXIL program is well-formed but cannot be lowered to AIR.
    #[error("lowering {stage} shader model {model} DXIL to AIR is not implemented")]
    Unsupported {
        /// Shader stage from the program header.
        stage: ShaderStage,
        /// Shader model from the program header.
        model: ShaderModel,
    },
}

impl LoadError {
    /// `true` when the blob itself is malformed, as opposed to well-formed
    /// input the converter cannot handle yet.
    ///
    /// [`LoadError::StructuralMd5Mismatch`] does not count: compiler-signed
    /// containers fail that check without being corrupt.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Container(_) | Self::Program(_))
    }
}
