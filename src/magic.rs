use crate::layout::{
    Endian, Width, FAT_CIGAM, FAT_CIGAM_64, FAT_MAGIC, FAT_MAGIC_64, MH_CIGAM, MH_CIGAM_64,
    MH_MAGIC, MH_MAGIC_64,
};

/// What the first four bytes of an input say it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    /// A thin image; the endianness applies to every field that follows.
    Thin(Width, Endian),
    /// A universal binary. Its header and table are big-endian regardless of
    /// which variant matched.
    Fat(Width),
    Unrecognized,
}

impl Magic {
    pub fn classify(bytes: [u8; 4]) -> Self {
        // Reading big-endian makes MAGIC mean "big-endian fields" and CIGAM
        // mean "little-endian fields" independent of the host.
        match u32::from_be_bytes(bytes) {
            MH_MAGIC => Magic::Thin(Width::Bits32, Endian::Big),
            MH_CIGAM => Magic::Thin(Width::Bits32, Endian::Little),
            MH_MAGIC_64 => Magic::Thin(Width::Bits64, Endian::Big),
            MH_CIGAM_64 => Magic::Thin(Width::Bits64, Endian::Little),
            FAT_MAGIC | FAT_CIGAM => Magic::Fat(Width::Bits32),
            FAT_MAGIC_64 | FAT_CIGAM_64 => Magic::Fat(Width::Bits64),
            _ => Magic::Unrecognized,
        }
    }
}
