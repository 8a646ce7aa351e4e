/// Default cap on the size of a blob handed to [`crate::DxilToAir::try_load`].
///
/// Real DXIL containers are well under a megabyte; library shaders with debug
/// info can reach a few.
pub const DEFAULT_MAX_BLOB_BYTES: usize = 16 * 1024 * 1024; // 16 MiB

/// Options fixed at converter construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Blobs longer than this are refused before any parsing.
    pub max_blob_bytes: usize,
    /// Compare the header checksum against a plain MD5 of the container
    /// with the checksum field zeroed.
    ///
    /// This is the structural scheme synthetic containers are built with, not
    /// the hash a shader compiler signs with, so compiler output never
    /// matches. Only honored with the `md5` feature; otherwise ignored.
    pub structural_md5: bool,
}

impl ConverterConfig {
    /// Returns the config with the size cap set to `max_blob_bytes`.
    pub fn with_max_blob_bytes(mut self, max_blob_bytes: usize) -> Self {
        self.max_blob_bytes = max_blob_bytes;
        self
    }

    /// Returns the config with the structural MD5 check switched on or off.
    pub fn with_structural_md5(mut self, structural_md5: bool) -> Self {
        self.structural_md5 = structural_md5;
        self
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_blob_bytes: DEFAULT_MAX_BLOB_BYTES,
            structural_md5: false,
        }
    }
}
