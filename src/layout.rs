//! On-disk record shapes of the Mach-O and universal-binary formats.
//!
//! Every record is decoded field by field from a byte slice; nothing here
//! depends on the host's struct layout or byte order.

pub const MH_MAGIC: u32 = 0xfeedface;
pub const MH_CIGAM: u32 = 0xcefaedfe;
pub const MH_MAGIC_64: u32 = 0xfeedfacf;
pub const MH_CIGAM_64: u32 = 0xcffaedfe;
pub const FAT_MAGIC: u32 = 0xcafebabe;
pub const FAT_CIGAM: u32 = 0xbebafeca;
pub const FAT_MAGIC_64: u32 = 0xcafebabf;
pub const FAT_CIGAM_64: u32 = 0xbfbafeca;

pub const LC_REQ_DYLD: u32 = 0x80000000;
pub const LC_LOAD_DYLIB: u32 = 0x0c;
pub const LC_ID_DYLIB: u32 = 0x0d;
pub const LC_LOAD_WEAK_DYLIB: u32 = 0x18 | LC_REQ_DYLD;
pub const LC_RPATH: u32 = 0x1c | LC_REQ_DYLD;

/// Byte order of the fields that follow a magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub fn read_u32(self, bytes: &[u8], offset: usize) -> Option<u32> {
        let raw: [u8; 4] = bytes.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(match self {
            Endian::Little => u32::from_le_bytes(raw),
            Endian::Big => u32::from_be_bytes(raw),
        })
    }

    pub fn read_u64(self, bytes: &[u8], offset: usize) -> Option<u64> {
        let raw: [u8; 8] = bytes.get(offset..offset.checked_add(8)?)?.try_into().ok()?;
        Some(match self {
            Endian::Little => u64::from_le_bytes(raw),
            Endian::Big => u64::from_be_bytes(raw),
        })
    }

    pub fn read_i32(self, bytes: &[u8], offset: usize) -> Option<i32> {
        self.read_u32(bytes, offset).map(|v| v as i32)
    }
}

/// Selects between the 32-bit and 64-bit shape of a header or fat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Bits32,
    Bits64,
}

/// `mach_header` / `mach_header_64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachHeader {
    pub cputype: i32,
    pub cpusubtype: i32,
    pub filetype: u32,
    pub ncmds: u32,
    pub sizeofcmds: u32,
    pub flags: u32,
    /// Only present in the 64-bit shape.
    pub reserved: Option<u32>,
}

impl MachHeader {
    pub fn size(width: Width) -> usize {
        match width {
            Width::Bits32 => 28,
            Width::Bits64 => 32,
        }
    }

    pub fn parse(bytes: &[u8], width: Width, endian: Endian) -> Option<Self> {
        Some(Self {
            cputype: endian.read_i32(bytes, 4)?,
            cpusubtype: endian.read_i32(bytes, 8)?,
            filetype: endian.read_u32(bytes, 12)?,
            ncmds: endian.read_u32(bytes, 16)?,
            sizeofcmds: endian.read_u32(bytes, 20)?,
            flags: endian.read_u32(bytes, 24)?,
            reserved: match width {
                Width::Bits32 => None,
                Width::Bits64 => Some(endian.read_u32(bytes, 28)?),
            },
        })
    }
}

/// `fat_header`. The count is big-endian whichever magic variant matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatHeader {
    pub nfat_arch: u32,
}

impl FatHeader {
    pub const SIZE: usize = 8;

    pub fn parse(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            nfat_arch: Endian::Big.read_u32(bytes, 4)?,
        })
    }
}

/// `fat_arch` / `fat_arch_64`, always big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatArch {
    pub cputype: i32,
    pub cpusubtype: i32,
    pub offset: u64,
    pub size: u64,
    pub align: u32,
}

impl FatArch {
    pub fn size(width: Width) -> usize {
        match width {
            Width::Bits32 => 20,
            Width::Bits64 => 32,
        }
    }

    pub fn parse(bytes: &[u8], width: Width) -> Option<Self> {
        let be = Endian::Big;
        let (offset, size, align) = match width {
            Width::Bits32 => (
                u64::from(be.read_u32(bytes, 8)?),
                u64::from(be.read_u32(bytes, 12)?),
                be.read_u32(bytes, 16)?,
            ),
            Width::Bits64 => (
                be.read_u64(bytes, 8)?,
                be.read_u64(bytes, 16)?,
                be.read_u32(bytes, 24)?,
            ),
        };
        Some(Self {
            cputype: be.read_i32(bytes, 0)?,
            cpusubtype: be.read_i32(bytes, 4)?,
            offset,
            size,
            align,
        })
    }
}

/// `load_command`: the generic prefix of every load command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHeader {
    pub cmd: u32,
    /// Includes these 8 bytes.
    pub cmdsize: u32,
}

impl CommandHeader {
    pub const SIZE: usize = 8;

    pub fn parse(bytes: &[u8], endian: Endian) -> Option<Self> {
        Some(Self {
            cmd: endian.read_u32(bytes, 0)?,
            cmdsize: endian.read_u32(bytes, 4)?,
        })
    }
}

/// Offset of the `lc_str` field in both `dylib_command` and `rpath_command`.
pub const PATH_OFFSET_FIELD: usize = 8;
