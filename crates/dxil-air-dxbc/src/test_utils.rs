use crate::{FourCC, DXIL_PROGRAM_HEADER_LEN};

const TOTAL_SIZE_POS: usize = 4 + 16 + 4;

/// Builds a structurally valid `DXBC` container holding `chunks` in order.
///
/// The checksum field is left as zeros; parsing does not check it. Use
/// [`build_container_with_md5`] when a matching checksum is needed.
pub fn build_container(chunks: &[(FourCC, &[u8])]) -> Vec<u8> {
    let header_len = 4 + 16 + 4 + 4 + 4 + 4 * chunks.len();
    let payload_len: usize = chunks.iter().map(|(_, data)| 8 + data.len()).sum();

    let mut out = Vec::with_capacity(header_len + payload_len);
    out.extend_from_slice(&FourCC::DXBC.0);
    out.extend_from_slice(&[0u8; 16]); // checksum
    out.extend_from_slice(&1u32.to_le_bytes()); // reserved
    out.extend_from_slice(&0u32.to_le_bytes()); // total_size, patched below
    out.extend_from_slice(&to_u32(chunks.len(), "chunk_count").to_le_bytes());

    let table_pos = out.len();
    out.resize(header_len, 0);

    for (i, (fourcc, data)) in chunks.iter().enumerate() {
        let offset = to_u32(out.len(), "chunk offset");
        out[table_pos + i * 4..table_pos + i * 4 + 4].copy_from_slice(&offset.to_le_bytes());

        out.extend_from_slice(&fourcc.0);
        out.extend_from_slice(&to_u32(data.len(), "chunk size").to_le_bytes());
        out.extend_from_slice(data);
    }

    let total_size = to_u32(out.len(), "total_size");
    out[TOTAL_SIZE_POS..TOTAL_SIZE_POS + 4].copy_from_slice(&total_size.to_le_bytes());
    out
}

/// Like [`build_container`], but fills in the checksum that
/// [`crate::DxbcFile::compute_md5_checksum`] expects.
#[cfg(feature = "md5")]
pub fn build_container_with_md5(chunks: &[(FourCC, &[u8])]) -> Vec<u8> {
    let mut out = build_container(chunks);
    // build_container leaves the checksum zeroed, which is what the digest covers.
    let digest = md5::compute(&out).0;
    out[4..20].copy_from_slice(&digest);
    out
}

/// Builds a `DXIL` part payload: program header followed by `bitcode`.
///
/// `program_version` uses the packed encoding (`kind << 16 | major << 4 | minor`).
/// The DXIL version is set to `1.<minor>`, and the bitcode is zero-padded to a
/// dword boundary.
pub fn build_dxil_part(program_version: u32, bitcode: &[u8]) -> Vec<u8> {
    let padded_len = bitcode.len().div_ceil(4) * 4;
    let program_len = DXIL_PROGRAM_HEADER_LEN + padded_len;

    let mut out = Vec::with_capacity(program_len);
    out.extend_from_slice(&program_version.to_le_bytes());
    out.extend_from_slice(&to_u32(program_len / 4, "program size").to_le_bytes());
    out.extend_from_slice(&FourCC::DXIL.0);
    out.extend_from_slice(&(0x100 | (program_version & 0xF)).to_le_bytes());
    out.extend_from_slice(&16u32.to_le_bytes()); // bitcode offset, relative to the magic
    out.extend_from_slice(&to_u32(bitcode.len(), "bitcode size").to_le_bytes());
    out.extend_from_slice(bitcode);
    out.resize(program_len, 0);
    out
}

/// Builds a container with a single `DXIL` part, the way a compiler emits a
/// stripped shader.
pub fn build_dxil_container(program_version: u32, bitcode: &[u8]) -> Vec<u8> {
    let part = build_dxil_part(program_version, bitcode);
    build_container(&[(FourCC::DXIL, &part), (FourCC::HASH, &[0u8; 20])])
}

fn to_u32(value: usize, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("{what} {value} does not fit in u32"))
}
