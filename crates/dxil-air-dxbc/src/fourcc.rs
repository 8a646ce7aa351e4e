use core::fmt;

/// A four-character code identifying a container or chunk (`DXBC`, `DXIL`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Container magic.
    pub const DXBC: FourCC = FourCC(*b"DXBC");
    /// DXIL program part.
    pub const DXIL: FourCC = FourCC(*b"DXIL");
    /// DXIL program part with debug info (emitted instead of, or next to, `DXIL`).
    pub const ILDB: FourCC = FourCC(*b"ILDB");
    /// Debug name part.
    pub const ILDN: FourCC = FourCC(*b"ILDN");
    /// Shader hash part.
    pub const HASH: FourCC = FourCC(*b"HASH");
    /// Input signature (DXIL-era spelling).
    pub const ISG1: FourCC = FourCC(*b"ISG1");
    /// Output signature (DXIL-era spelling).
    pub const OSG1: FourCC = FourCC(*b"OSG1");
    /// Patch-constant signature (DXIL-era spelling).
    pub const PSG1: FourCC = FourCC(*b"PSG1");
    /// Pipeline state validation part.
    pub const PSV0: FourCC = FourCC(*b"PSV0");
    /// Root signature part.
    pub const RTS0: FourCC = FourCC(*b"RTS0");
    /// Shader statistics part.
    pub const STAT: FourCC = FourCC(*b"STAT");
    /// SM4 token stream (pre-DXIL bytecode).
    pub const SHDR: FourCC = FourCC(*b"SHDR");
    /// SM5 token stream (pre-DXIL bytecode).
    pub const SHEX: FourCC = FourCC(*b"SHEX");

    /// Reads a code from the first four bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let code: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(Self(code))
    }

    /// Returns `true` for the pre-DXIL token stream chunks (`SHDR`/`SHEX`).
    pub fn is_legacy_bytecode(self) -> bool {
        self == Self::SHDR || self == Self::SHEX
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_escapes_unprintable_bytes() {
        assert_eq!(FourCC::DXIL.to_string(), "DXIL");
        assert_eq!(FourCC([b'A', 0, 0xff, b'Z']).to_string(), "A\\x00\\xffZ");
        assert_eq!(format!("{:?}", FourCC::HASH), "FourCC(\"HASH\")");
    }

    #[test]
    fn from_bytes_needs_four_bytes() {
        assert_eq!(FourCC::from_bytes(b"DXBCtail"), Some(FourCC::DXBC));
        assert_eq!(FourCC::from_bytes(b"DXB"), None);
    }
}
