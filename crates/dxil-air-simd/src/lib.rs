//! Small 4-lane `f32` vector helpers used by the DXIL to AIR converter.
//!
//! The only arithmetic provided today is [`simd_muladd`], a drop-in for the
//! platform vector-math routine of the same name. It is **not** a fused
//! multiply-add: each lane rounds once after the multiply and once after the
//! add, matching the routine it stands in for.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod float4;
mod muladd;

pub use crate::float4::SimdFloat4;
pub use crate::muladd::simd_muladd;
