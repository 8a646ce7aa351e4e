//! DXIL to AIR shader converter.
//!
//! [`DxilToAir`] is the object a host application holds on to. Lowering DXIL
//! to AIR is not implemented yet, so [`DxilToAir::load`] always reports
//! failure; [`DxilToAir::try_load`] says why a given blob was refused.
//!
//! The 4-lane multiply-add helper lives in `dxil-air-simd` and is unrelated to
//! the converter object.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod converter;
mod error;

pub use crate::config::{ConverterConfig, DEFAULT_MAX_BLOB_BYTES};
pub use crate::converter::DxilToAir;
pub use crate::error::LoadError;
