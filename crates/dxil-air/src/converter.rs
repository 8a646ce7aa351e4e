use dxil_air_dxbc::{parse_dxil_program_header, DxbcFile};
use tracing::debug;

use crate::{ConverterConfig, LoadError};

/// A DXIL to AIR converter instance.
///
/// The object has a single state: constructed. Nothing it does mutates it, so
/// it is `Send + Sync`, and hosts that need shared ownership wrap it in an
/// `Arc`.
#[derive(Debug, Default)]
pub struct DxilToAir {
    // Reserved for converter state; nothing reads or writes it yet.
    _reserved: i32,
    config: ConverterConfig,
}

impl DxilToAir {
    /// Creates a converter with [`ConverterConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter that diagnoses blobs under `config`.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            _reserved: 0,
            config,
        }
    }

    /// The options this converter was built with.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Loads a DXIL shader blob for conversion.
    ///
    /// Always returns `false`: no DXIL to AIR lowering exists yet. The input
    /// is not inspected and nothing is logged. Use [`DxilToAir::try_load`]
    /// for the reason.
    pub fn load(&self, _data: &[u8]) -> bool {
        false
    }

    /// Like [`DxilToAir::load`], but reports why the blob was refused.
    ///
    /// Never returns `Ok`. Checks run in order: empty input, size cap,
    /// container structure, structural MD5 (if configured), presence of a
    /// DXIL part, DXIL program header. A blob passing all of them yields
    /// [`LoadError::Unsupported`]. The outcome is logged at `debug`.
    pub fn try_load(&self, data: &[u8]) -> Result<(), LoadError> {
        let err = self.diagnose(data);
        debug!(len = data.len(), malformed = err.is_malformed(), "DXIL load refused: {err}");
        Err(err)
    }

    fn diagnose(&self, data: &[u8]) -> LoadError {
        if data.is_empty() {
            return LoadError::Empty;
        }
        if data.len() > self.config.max_blob_bytes {
            return LoadError::TooLarge {
                len: data.len(),
                max: self.config.max_blob_bytes,
            };
        }

        let file = match DxbcFile::parse(data) {
            Ok(file) => file,
            Err(err) => return err.into(),
        };

        if self.config.structural_md5 && !structural_md5_ok(&file) {
            return LoadError::StructuralMd5Mismatch;
        }

        let Some(part) = file.dxil_chunk() else {
            return match file.legacy_bytecode_chunk() {
                Some(chunk) => LoadError::LegacyBytecode(chunk.fourcc),
                None => LoadError::MissingDxil,
            };
        };

        match parse_dxil_program_header(part.data) {
            Ok(program) => {
                debug!(
                    stage = %program.stage,
                    model = %program.model,
                    bitcode_len = program.bitcode.len(),
                    "found DXIL program"
                );
                LoadError::Unsupported {
                    stage: program.stage,
                    model: program.model,
                }
            }
            Err(err) => LoadError::Program(err),
        }
    }
}

#[cfg(feature = "md5")]
fn structural_md5_ok(file: &DxbcFile<'_>) -> bool {
    file.checksum_matches()
}

#[cfg(not(feature = "md5"))]
fn structural_md5_ok(_file: &DxbcFile<'_>) -> bool {
    tracing::warn!("structural MD5 check requested but the md5 feature is disabled");
    true
}
