use std::io::{Read, Seek};

use log::debug;

use crate::{
    arch, commands,
    error::{Error, Result},
    layout::{Endian, MachHeader, Width},
    source::ByteSource,
};

/// Linkage metadata of one architecture slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureRecord {
    pub architecture: String,
    /// Set by the last `LC_ID_DYLIB`, if any.
    pub install_name: Option<String>,
    pub dependencies: Vec<String>,
    pub search_paths: Vec<String>,
}

/// A decoded image plus anything that went wrong below slice level.
#[derive(Debug)]
pub struct ThinImage {
    pub header: MachHeader,
    pub record: ArchitectureRecord,
    pub issues: Vec<Error>,
}

/// Parses the thin image whose header starts at `offset`. Nothing at or
/// past `end` is read: the file length for a thin file, the end of the slice
/// inside a universal binary.
pub fn parse<R: Read + Seek>(
    source: &mut ByteSource<R>,
    offset: u64,
    end: u64,
    width: Width,
    endian: Endian,
) -> Result<ThinImage> {
    let header_size = MachHeader::size(width);
    let available = end.saturating_sub(offset);
    if header_size as u64 > available {
        return Err(Error::TruncatedInput {
            offset,
            requested: header_size as u64,
            available,
        });
    }
    let bytes = source.read_exact(offset, header_size)?;
    let header = MachHeader::parse(&bytes, width, endian).ok_or(Error::TruncatedInput {
        offset,
        requested: header_size as u64,
        available: bytes.len() as u64,
    })?;

    let architecture =
        arch::resolve(header.cputype, header.cpusubtype).ok_or(Error::UnresolvedArchitecture {
            cputype: header.cputype,
            cpusubtype: header.cpusubtype,
        })?;
    debug!(
        "{architecture} image at {offset:#x}: {} commands in {} bytes",
        header.ncmds, header.sizeofcmds
    );

    let mut issues = Vec::new();

    // A short command area is decoded as far as it goes.
    let start = offset + header_size as u64;
    let available = end.min(source.len()).saturating_sub(start);
    let wanted = u64::from(header.sizeofcmds);
    let length = if wanted > available {
        issues.push(Error::TruncatedInput {
            offset: start,
            requested: wanted,
            available,
        });
        available
    } else {
        wanted
    };
    let area = source.read_exact(start, length as usize)?;

    let decoded = commands::decode(&area, header.ncmds, endian);
    if decoded.consumed < area.len() {
        debug!(
            "{} of {} command bytes left unused",
            area.len() - decoded.consumed,
            area.len()
        );
    }
    issues.extend(decoded.issues);

    Ok(ThinImage {
        header,
        record: ArchitectureRecord {
            architecture: architecture.to_owned(),
            install_name: decoded.install_name,
            dependencies: decoded.dependencies,
            search_paths: decoded.search_paths,
        },
        issues,
    })
}
