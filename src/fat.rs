use std::io::{Read, Seek};

use log::debug;

use crate::{
    arch,
    error::{Error, Result},
    layout::{FatArch, FatHeader, Width},
    magic::Magic,
    read_magic,
    source::ByteSource,
    thin::{self, ThinImage},
    Inspection,
};

/// Walks a universal binary's architecture table and parses every slice
/// in table order. A failing slice is recorded and skipped.
pub fn parse<R: Read + Seek>(source: &mut ByteSource<R>, width: Width) -> Result<Inspection> {
    let bytes = source.read_exact(0, FatHeader::SIZE)?;
    let header = FatHeader::parse(&bytes).ok_or(Error::TruncatedInput {
        offset: 0,
        requested: FatHeader::SIZE as u64,
        available: bytes.len() as u64,
    })?;
    debug!("fat binary ({width:?} table) with {} architectures", header.nfat_arch);

    let record_size = FatArch::size(width);
    let mut inspection = Inspection::default();

    for index in 0..header.nfat_arch as usize {
        let at = FatHeader::SIZE as u64 + index as u64 * record_size as u64;
        let entry = match source.read_exact(at, record_size) {
            Ok(bytes) => FatArch::parse(&bytes, width),
            Err(error) => {
                // Later records sit even further past the end.
                inspection.push(Some(index), error);
                break;
            }
        };
        let Some(entry) = entry else { break };

        match slice(source, index, &entry) {
            Ok(image) => {
                inspection.extend(Some(index), image.issues);
                inspection.records.push(image.record);
            }
            Err(error) => inspection.push(Some(index), error),
        }
    }

    Ok(inspection)
}

fn slice<R: Read + Seek>(
    source: &mut ByteSource<R>,
    index: usize,
    entry: &FatArch,
) -> Result<ThinImage> {
    if arch::resolve(entry.cputype, entry.cpusubtype).is_none() {
        return Err(Error::UnresolvedArchitecture {
            cputype: entry.cputype,
            cpusubtype: entry.cpusubtype,
        });
    }

    let file_len = source.len();
    let end = match entry.offset.checked_add(entry.size) {
        Some(end) if end <= file_len => end,
        _ => {
            return Err(Error::SliceOutOfBounds {
                index,
                offset: entry.offset,
                size: entry.size,
                file_len,
            })
        }
    };

    debug!(
        "slice {index}: cputype {:#x}, cpusubtype {:#x} at {:#x}",
        entry.cputype, entry.cpusubtype, entry.offset
    );
    let magic = read_magic(source, entry.offset)?;
    match Magic::classify(magic) {
        Magic::Thin(width, endian) => thin::parse(source, entry.offset, end, width, endian),
        _ => Err(Error::NotMachO {
            magic: magic.to_vec(),
        }),
    }
}
