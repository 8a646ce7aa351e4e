use core::fmt;

use crate::error::DxbcError;
use crate::fourcc::FourCC;

// magic + checksum + reserved + total_size + chunk_count
const DXBC_HEADER_LEN: usize = 4 + 16 + 4 + 4 + 4;
const CHUNK_HEADER_LEN: usize = 8;

/// Upper bound on the chunk count accepted by [`DxbcFile::parse`].
///
/// DXIL containers hold around ten parts. The cap keeps a hostile header from
/// forcing a huge offset table walk.
pub const MAX_DXBC_CHUNK_COUNT: u32 = 4096;

/// The fixed header of a `DXBC` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxbcHeader {
    /// Always [`FourCC::DXBC`] for a parsed file.
    pub magic: FourCC,
    /// Checksum stored in the header (MD5). Not validated during parsing.
    pub checksum: [u8; 16],
    /// Declared size of the container in bytes.
    pub total_size: u32,
    /// Number of entries in the chunk offset table.
    pub chunk_count: u32,
}

/// A single chunk (a "part", in DXIL terms) within a `DXBC` container.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct DxbcChunk<'a> {
    /// Chunk identifier (e.g. `DXIL`, `PSV0`, `HASH`).
    pub fourcc: FourCC,
    /// Chunk payload, excluding the 8-byte chunk header.
    pub data: &'a [u8],
}

impl fmt::Debug for DxbcChunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DxbcChunk")
            .field("fourcc", &self.fourcc)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A parsed `DXBC` container.
///
/// Every chunk is validated up front, so iteration afterwards cannot fail.
#[derive(Debug, Clone)]
pub struct DxbcFile<'a> {
    bytes: &'a [u8],
    header: DxbcHeader,
    chunk_offsets: &'a [u8],
}

impl<'a> DxbcFile<'a> {
    /// Parses a `DXBC` container from `bytes`.
    ///
    /// Bytes past the declared `total_size` are ignored.
    pub fn parse(bytes: &'a [u8]) -> Result<DxbcFile<'a>, DxbcError> {
        if bytes.len() < DXBC_HEADER_LEN {
            return Err(DxbcError::malformed_header(format!(
                "need at least {DXBC_HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let magic = FourCC::from_bytes(bytes)
            .ok_or_else(|| DxbcError::malformed_header("failed to read magic"))?;
        if magic != FourCC::DXBC {
            return Err(DxbcError::malformed_header(format!(
                "bad magic {magic:?}, expected {:?}",
                FourCC::DXBC
            )));
        }

        let mut checksum = [0u8; 16];
        checksum.copy_from_slice(&bytes[4..20]);
        // bytes 20..24 are reserved (always 1 in practice)
        let total_size = read_u32_le(bytes, 24)?;
        let chunk_count = read_u32_le(bytes, 28)?;

        if chunk_count > MAX_DXBC_CHUNK_COUNT {
            return Err(DxbcError::malformed_offsets(format!(
                "chunk_count {chunk_count} exceeds maximum {MAX_DXBC_CHUNK_COUNT}"
            )));
        }
        if (total_size as usize) < DXBC_HEADER_LEN {
            return Err(DxbcError::malformed_header(format!(
                "total_size {total_size} is smaller than header size {DXBC_HEADER_LEN}"
            )));
        }
        if total_size as usize > bytes.len() {
            return Err(DxbcError::out_of_bounds(format!(
                "total_size {total_size} exceeds buffer length {}",
                bytes.len()
            )));
        }
        let bytes = &bytes[..total_size as usize];

        // chunk_count <= MAX_DXBC_CHUNK_COUNT, so this cannot overflow.
        let offset_table_end = DXBC_HEADER_LEN + chunk_count as usize * 4;
        if offset_table_end > bytes.len() {
            return Err(DxbcError::malformed_offsets(format!(
                "chunk offset table ends at {offset_table_end}, but total_size is {}",
                bytes.len()
            )));
        }
        let chunk_offsets = &bytes[DXBC_HEADER_LEN..offset_table_end];

        for (index, raw) in chunk_offsets.chunks_exact(4).enumerate() {
            let offset = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
            if offset < offset_table_end {
                let region = if offset < DXBC_HEADER_LEN {
                    "DXBC header"
                } else {
                    "chunk offset table"
                };
                return Err(DxbcError::malformed_offsets(format!(
                    "chunk {index} offset {offset} points into the {region} (need >= {offset_table_end})"
                )));
            }
            chunk_at(bytes, offset, index)?;
        }

        Ok(DxbcFile {
            bytes,
            header: DxbcHeader {
                magic,
                checksum,
                total_size,
                chunk_count,
            },
            chunk_offsets,
        })
    }

    /// Returns the parsed header.
    pub fn header(&self) -> &DxbcHeader {
        &self.header
    }

    /// Returns the bytes covered by the declared `total_size`.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Iterates over all chunks in file order.
    pub fn chunks(&self) -> impl Iterator<Item = DxbcChunk<'a>> + '_ {
        let bytes = self.bytes;
        self.chunk_offsets
            .chunks_exact(4)
            .enumerate()
            .filter_map(move |(index, raw)| {
                let offset = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
                chunk_at(bytes, offset, index).ok()
            })
    }

    /// Returns the first chunk matching `fourcc`, if any.
    pub fn get_chunk(&self, fourcc: FourCC) -> Option<DxbcChunk<'a>> {
        self.chunks().find(|chunk| chunk.fourcc == fourcc)
    }

    /// Iterates over all chunks matching `fourcc`, in file order.
    pub fn get_chunks(&self, fourcc: FourCC) -> impl Iterator<Item = DxbcChunk<'a>> + '_ {
        self.chunks().filter(move |chunk| chunk.fourcc == fourcc)
    }

    /// Returns the DXIL program part.
    ///
    /// Prefers `DXIL`; falls back to `ILDB`, which carries the same program
    /// header followed by bitcode with debug info.
    pub fn dxil_chunk(&self) -> Option<DxbcChunk<'a>> {
        self.get_chunk(FourCC::DXIL)
            .or_else(|| self.get_chunk(FourCC::ILDB))
    }

    /// Returns the first pre-DXIL token stream chunk (`SHEX` or `SHDR`).
    pub fn legacy_bytecode_chunk(&self) -> Option<DxbcChunk<'a>> {
        self.chunks().find(|chunk| chunk.fourcc.is_legacy_bytecode())
    }

    /// Returns a human-readable summary of the container and its chunks.
    pub fn debug_summary(&self) -> String {
        use core::fmt::Write as _;

        let mut out = String::new();
        let _ = write!(
            &mut out,
            "{} total_size={} chunk_count={}",
            self.header.magic, self.header.total_size, self.header.chunk_count
        );
        for (idx, chunk) in self.chunks().enumerate() {
            let _ = write!(
                &mut out,
                "\n  [{idx:02}] {} {} bytes",
                chunk.fourcc,
                chunk.data.len()
            );
        }
        out
    }

    /// Computes the MD5 checksum of the container with the checksum field zeroed.
    ///
    /// Parsing never checks this; callers opt in by comparing against
    /// [`DxbcHeader::checksum`] (or via [`DxbcFile::checksum_matches`]).
    #[cfg(feature = "md5")]
    pub fn compute_md5_checksum(&self) -> [u8; 16] {
        let mut ctx = md5::Context::new();
        ctx.consume(&self.bytes[..4]);
        ctx.consume([0u8; 16]);
        ctx.consume(&self.bytes[20..]);
        ctx.compute().0
    }

    /// Returns `true` if the computed checksum matches the stored one.
    #[cfg(feature = "md5")]
    pub fn checksum_matches(&self) -> bool {
        self.compute_md5_checksum() == self.header.checksum
    }
}

/// Reads and bounds-checks the chunk starting at `offset`.
fn chunk_at(bytes: &[u8], offset: usize, index: usize) -> Result<DxbcChunk<'_>, DxbcError> {
    let header_end = offset.checked_add(CHUNK_HEADER_LEN).ok_or_else(|| {
        DxbcError::malformed_offsets(format!(
            "chunk {index} offset {offset} overflows when reading header"
        ))
    })?;
    let header = bytes.get(offset..header_end).ok_or_else(|| {
        DxbcError::out_of_bounds(format!(
            "chunk {index} header at {offset}..{header_end} is outside total_size {}",
            bytes.len()
        ))
    })?;

    let fourcc = FourCC([header[0], header[1], header[2], header[3]]);
    let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    let data_end = header_end.checked_add(size).ok_or_else(|| {
        DxbcError::malformed_offsets(format!(
            "chunk {index} size {size} overflows when computing data range"
        ))
    })?;
    let data = bytes.get(header_end..data_end).ok_or_else(|| {
        DxbcError::out_of_bounds(format!(
            "chunk {index} ({fourcc}) data at {header_end}..{data_end} is outside total_size {}",
            bytes.len()
        ))
    })?;

    Ok(DxbcChunk { fourcc, data })
}

pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32, DxbcError> {
    let end = offset
        .checked_add(4)
        .ok_or_else(|| DxbcError::out_of_bounds("offset overflows when reading u32"))?;
    let slice = bytes.get(offset..end).ok_or_else(|| {
        DxbcError::out_of_bounds(format!(
            "need 4 bytes at {offset}..{end}, but buffer length is {}",
            bytes.len()
        ))
    })?;
    Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}
