use core::fmt;

use crate::dxbc::read_u32_le;
use crate::error::DxbcError;
use crate::fourcc::FourCC;

/// Size of the fixed program header at the start of a `DXIL`/`ILDB` part.
///
/// Layout (all little-endian `u32`):
///
/// | offset | field            |
/// |--------|------------------|
/// | 0      | program version  |
/// | 4      | size in dwords   |
/// | 8      | `DXIL` magic     |
/// | 12     | DXIL version     |
/// | 16     | bitcode offset   |
/// | 20     | bitcode size     |
///
/// The bitcode offset is relative to the `DXIL` magic, not the part start.
pub const DXIL_PROGRAM_HEADER_LEN: usize = 24;

const BITCODE_HEADER_START: usize = 8;

/// Pipeline stage (or program kind) encoded in a program version word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ShaderStage {
    Pixel,
    Vertex,
    Geometry,
    Hull,
    Domain,
    Compute,
    Library,
    RayGeneration,
    Intersection,
    AnyHit,
    ClosestHit,
    Miss,
    Callable,
    Mesh,
    Amplification,
    Node,
    /// A program kind this crate does not know about.
    Unknown(u16),
}

impl ShaderStage {
    fn from_kind(kind: u16) -> Self {
        match kind {
            0 => Self::Pixel,
            1 => Self::Vertex,
            2 => Self::Geometry,
            3 => Self::Hull,
            4 => Self::Domain,
            5 => Self::Compute,
            6 => Self::Library,
            7 => Self::RayGeneration,
            8 => Self::Intersection,
            9 => Self::AnyHit,
            10 => Self::ClosestHit,
            11 => Self::Miss,
            12 => Self::Callable,
            13 => Self::Mesh,
            14 => Self::Amplification,
            15 => Self::Node,
            other => Self::Unknown(other),
        }
    }

    /// Short profile prefix as used by shader compilers (`ps`, `vs`, `lib`, ...).
    pub fn profile_prefix(self) -> Option<&'static str> {
        Some(match self {
            Self::Pixel => "ps",
            Self::Vertex => "vs",
            Self::Geometry => "gs",
            Self::Hull => "hs",
            Self::Domain => "ds",
            Self::Compute => "cs",
            Self::Mesh => "ms",
            Self::Amplification => "as",
            Self::Library
            | Self::RayGeneration
            | Self::Intersection
            | Self::AnyHit
            | Self::ClosestHit
            | Self::Miss
            | Self::Callable
            | Self::Node => "lib",
            Self::Unknown(_) => return None,
        })
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(kind) => write!(f, "unknown({kind})"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// Shader model (`major.minor`), e.g. `6.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderModel {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
}

impl fmt::Display for ShaderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Splits a program version word into stage and shader model.
///
/// - bits 0..=3: minor version
/// - bits 4..=7: major version
/// - bits 16..=31: program kind
pub fn decode_program_version(version: u32) -> (ShaderStage, ShaderModel) {
    let minor = (version & 0xF) as u8;
    let major = ((version >> 4) & 0xF) as u8;
    let kind = (version >> 16) as u16;
    (ShaderStage::from_kind(kind), ShaderModel { major, minor })
}

/// The fixed header of a DXIL program part, plus the bitcode it points at.
#[derive(Clone, PartialEq, Eq)]
pub struct DxilProgramHeader<'a> {
    /// Pipeline stage from the program version word.
    pub stage: ShaderStage,
    /// Shader model from the program version word.
    pub model: ShaderModel,
    /// Declared size of the program, in dwords, including this header.
    pub size_in_dwords: u32,
    /// Raw DXIL version word (`major << 8 | minor`).
    pub dxil_version: u32,
    /// LLVM bitcode. Opaque to this crate.
    pub bitcode: &'a [u8],
}

impl DxilProgramHeader<'_> {
    /// DXIL version as `(major, minor)`.
    pub fn dxil_version_parts(&self) -> (u8, u8) {
        (
            ((self.dxil_version >> 8) & 0xFF) as u8,
            (self.dxil_version & 0xFF) as u8,
        )
    }
}

impl fmt::Debug for DxilProgramHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DxilProgramHeader")
            .field("stage", &self.stage)
            .field("model", &self.model)
            .field("size_in_dwords", &self.size_in_dwords)
            .field("dxil_version", &self.dxil_version)
            .field("bitcode_len", &self.bitcode.len())
            .finish()
    }
}

/// Parses the program header at the start of a `DXIL`/`ILDB` part payload.
pub fn parse_dxil_program_header(part: &[u8]) -> Result<DxilProgramHeader<'_>, DxbcError> {
    if part.len() < DXIL_PROGRAM_HEADER_LEN {
        return Err(DxbcError::invalid_chunk(format!(
            "DXIL program header needs {DXIL_PROGRAM_HEADER_LEN} bytes, got {}",
            part.len()
        )));
    }

    let version = read_u32_le(part, 0)?;
    let size_in_dwords = read_u32_le(part, 4)?;
    let magic = FourCC::from_bytes(&part[BITCODE_HEADER_START..])
        .ok_or_else(|| DxbcError::invalid_chunk("failed to read DXIL magic"))?;
    if magic != FourCC::DXIL {
        return Err(DxbcError::invalid_chunk(format!(
            "bad DXIL magic {magic:?}, expected {:?}",
            FourCC::DXIL
        )));
    }
    let dxil_version = read_u32_le(part, 12)?;
    let bitcode_offset = read_u32_le(part, 16)? as usize;
    let bitcode_size = read_u32_le(part, 20)? as usize;

    let program_len = (size_in_dwords as usize).checked_mul(4).ok_or_else(|| {
        DxbcError::invalid_chunk(format!("program size {size_in_dwords} dwords overflows"))
    })?;
    if program_len < DXIL_PROGRAM_HEADER_LEN {
        return Err(DxbcError::invalid_chunk(format!(
            "program size {program_len} bytes is smaller than its header"
        )));
    }
    if program_len > part.len() {
        return Err(DxbcError::out_of_bounds(format!(
            "program declares {program_len} bytes but the part holds {}",
            part.len()
        )));
    }

    let start = BITCODE_HEADER_START
        .checked_add(bitcode_offset)
        .ok_or_else(|| DxbcError::invalid_chunk("bitcode offset overflows"))?;
    let end = start
        .checked_add(bitcode_size)
        .ok_or_else(|| DxbcError::invalid_chunk("bitcode size overflows"))?;
    if start < DXIL_PROGRAM_HEADER_LEN {
        return Err(DxbcError::invalid_chunk(format!(
            "bitcode offset {bitcode_offset} overlaps the program header"
        )));
    }
    if end > program_len {
        return Err(DxbcError::out_of_bounds(format!(
            "bitcode at {start}..{end} is outside the {program_len}-byte program"
        )));
    }

    let (stage, model) = decode_program_version(version);
    Ok(DxilProgramHeader {
        stage,
        model,
        size_in_dwords,
        dxil_version,
        bitcode: &part[start..end],
    })
}
