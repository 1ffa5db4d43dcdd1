//! Synthesizes Mach-O images for unit tests.

use crate::layout::{
    Endian, Width, FAT_MAGIC, FAT_MAGIC_64, LC_ID_DYLIB, LC_LOAD_DYLIB, LC_LOAD_WEAK_DYLIB,
    LC_RPATH, MH_MAGIC, MH_MAGIC_64,
};

fn put_u32(buf: &mut Vec<u8>, endian: Endian, value: u32) {
    match endian {
        Endian::Little => buf.extend_from_slice(&value.to_le_bytes()),
        Endian::Big => buf.extend_from_slice(&value.to_be_bytes()),
    }
}

/// A command carrying an `lc_str` path: `fixed_len` bytes of fixed fields
/// followed by the NUL-padded path.
pub fn path_command(endian: Endian, cmd: u32, fixed_len: usize, path: &str) -> Vec<u8> {
    let mut tail = path.as_bytes().to_vec();
    tail.push(0);
    while (fixed_len + tail.len()) % 8 != 0 {
        tail.push(0);
    }
    let cmdsize = (fixed_len + tail.len()) as u32;

    let mut buf = Vec::new();
    put_u32(&mut buf, endian, cmd);
    put_u32(&mut buf, endian, cmdsize);
    put_u32(&mut buf, endian, fixed_len as u32);
    buf.resize(fixed_len, 0);
    buf.extend_from_slice(&tail);
    buf
}

pub fn raw_command(endian: Endian, cmd: u32, cmdsize: u32, total_len: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    put_u32(&mut buf, endian, cmd);
    put_u32(&mut buf, endian, cmdsize);
    buf.resize(total_len.max(8), 0);
    buf
}

pub struct ImageBuilder {
    width: Width,
    endian: Endian,
    cputype: i32,
    cpusubtype: i32,
    commands: Vec<Vec<u8>>,
    ncmds: Option<u32>,
}

impl ImageBuilder {
    pub fn new(width: Width, endian: Endian, cputype: i32, cpusubtype: i32) -> Self {
        Self {
            width,
            endian,
            cputype,
            cpusubtype,
            commands: Vec::new(),
            ncmds: None,
        }
    }

    pub fn load_dylib(self, path: &str) -> Self {
        let cmd = path_command(self.endian, LC_LOAD_DYLIB, 24, path);
        self.command(cmd)
    }

    pub fn load_weak_dylib(self, path: &str) -> Self {
        let cmd = path_command(self.endian, LC_LOAD_WEAK_DYLIB, 24, path);
        self.command(cmd)
    }

    pub fn id_dylib(self, path: &str) -> Self {
        let cmd = path_command(self.endian, LC_ID_DYLIB, 24, path);
        self.command(cmd)
    }

    pub fn rpath(self, path: &str) -> Self {
        let cmd = path_command(self.endian, LC_RPATH, 12, path);
        self.command(cmd)
    }

    pub fn command(mut self, bytes: Vec<u8>) -> Self {
        self.commands.push(bytes);
        self
    }

    /// Overrides the declared command count.
    pub fn ncmds(mut self, ncmds: u32) -> Self {
        self.ncmds = Some(ncmds);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let body: Vec<u8> = self.commands.concat();
        let magic = match self.width {
            Width::Bits32 => MH_MAGIC,
            Width::Bits64 => MH_MAGIC_64,
        };

        let mut buf = Vec::new();
        // The magic itself is what tells a reader the byte order.
        put_u32(&mut buf, self.endian, magic);
        put_u32(&mut buf, self.endian, self.cputype as u32);
        put_u32(&mut buf, self.endian, self.cpusubtype as u32);
        put_u32(&mut buf, self.endian, 6); // MH_DYLIB
        put_u32(
            &mut buf,
            self.endian,
            self.ncmds.unwrap_or(self.commands.len() as u32),
        );
        put_u32(&mut buf, self.endian, body.len() as u32);
        put_u32(&mut buf, self.endian, 0);
        if self.width == Width::Bits64 {
            put_u32(&mut buf, self.endian, 0);
        }
        buf.extend_from_slice(&body);
        buf
    }
}

/// Lays out a universal binary; `slices` are `(cputype, cpusubtype, image)`.
/// With `swapped` the magic is written in its CIGAM byte order while every
/// other field stays big-endian.
pub fn fat(width: Width, swapped: bool, slices: &[(i32, i32, Vec<u8>)]) -> Vec<u8> {
    let magic = match width {
        Width::Bits32 => FAT_MAGIC,
        Width::Bits64 => FAT_MAGIC_64,
    };
    let record = match width {
        Width::Bits32 => 20,
        Width::Bits64 => 32,
    };

    let mut buf = Vec::new();
    if swapped {
        buf.extend_from_slice(&magic.to_le_bytes());
    } else {
        buf.extend_from_slice(&magic.to_be_bytes());
    }
    buf.extend_from_slice(&(slices.len() as u32).to_be_bytes());

    let align = 16usize;
    let mut offset = 8 + record * slices.len();
    let mut placed = Vec::new();
    for (cputype, cpusubtype, image) in slices {
        offset = (offset + align - 1) / align * align;
        buf.extend_from_slice(&cputype.to_be_bytes());
        buf.extend_from_slice(&cpusubtype.to_be_bytes());
        match width {
            Width::Bits32 => {
                buf.extend_from_slice(&(offset as u32).to_be_bytes());
                buf.extend_from_slice(&(image.len() as u32).to_be_bytes());
                buf.extend_from_slice(&4u32.to_be_bytes());
            }
            Width::Bits64 => {
                buf.extend_from_slice(&(offset as u64).to_be_bytes());
                buf.extend_from_slice(&(image.len() as u64).to_be_bytes());
                buf.extend_from_slice(&4u32.to_be_bytes());
                buf.extend_from_slice(&0u32.to_be_bytes());
            }
        }
        placed.push((offset, image));
        offset += image.len();
    }

    for (offset, image) in placed {
        buf.resize(offset, 0);
        buf.extend_from_slice(image);
    }
    buf
}
