//! A safe, zero-copy parser for the `DXBC` containers that carry DXIL shaders.
//!
//! Shader blobs handed to the converter are **untrusted**: every offset and
//! size is bounds-checked and no function in this crate panics on malformed
//! input.
//!
//! Two layers are provided:
//!
//! - [`DxbcFile`]: the container itself (header, chunk offset table, chunks).
//! - [`DxilProgramHeader`]: the fixed header at the start of a `DXIL`/`ILDB`
//!   part, which names the shader stage and model and locates the LLVM
//!   bitcode. The bitcode itself is returned as opaque bytes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dxbc;
mod dxil;
mod error;
mod fourcc;

/// Helpers for building synthetic `DXBC`/`DXIL` blobs in tests.
///
/// Only available when compiling this crate's own tests or with the
/// `test-utils` feature. Not part of the stable parsing API.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::dxbc::{DxbcChunk, DxbcFile, DxbcHeader, MAX_DXBC_CHUNK_COUNT};
pub use crate::dxil::{
    decode_program_version, parse_dxil_program_header, DxilProgramHeader, ShaderModel,
    ShaderStage, DXIL_PROGRAM_HEADER_LEN,
};
pub use crate::error::DxbcError;
pub use crate::fourcc::FourCC;
