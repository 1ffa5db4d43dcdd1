//! Reads the linkage metadata of Mach-O images: the architecture of every
//! slice, the library's own install name, its dylib dependencies and its
//! rpaths. Thin images and universal binaries are both supported.
//!
//! ```no_run
//! let inspection = dylib_info::inspect_path("/usr/lib/libobjc.A.dylib")?;
//! for record in &inspection.records {
//!     println!("{}: {:?}", record.architecture, record.dependencies);
//! }
//! # Ok::<(), dylib_info::Error>(())
//! ```

use std::{
    io::{Read, Seek},
    path::Path,
};

use log::{debug, warn};

pub mod arch;
pub mod commands;
pub mod error;
pub mod fat;
pub mod layout;
pub mod magic;
pub mod source;
pub mod thin;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
pub use magic::Magic;
pub use source::ByteSource;
pub use thin::ArchitectureRecord;

/// Something that went wrong below file level. The rest of the file was
/// still processed.
#[derive(Debug)]
pub struct Issue {
    /// Index into the fat architecture table, `None` for thin files.
    pub slice: Option<usize>,
    pub error: Error,
}

/// Everything extracted from one input.
#[derive(Debug, Default)]
pub struct Inspection {
    /// One per parsed slice, in on-disk order.
    pub records: Vec<ArchitectureRecord>,
    pub issues: Vec<Issue>,
}

impl Inspection {
    pub(crate) fn push(&mut self, slice: Option<usize>, error: Error) {
        match slice {
            Some(index) => warn!("slice {index}: {error}"),
            None => warn!("{error}"),
        }
        self.issues.push(Issue { slice, error });
    }

    pub(crate) fn extend(&mut self, slice: Option<usize>, errors: Vec<Error>) {
        for error in errors {
            self.push(slice, error);
        }
    }
}

pub fn inspect_path(path: impl AsRef<Path>) -> Result<Inspection> {
    let mut source = ByteSource::open(path)?;
    inspect(&mut source)
}

/// Classifies the input by its magic number and parses it.
///
/// Fails only when the input cannot be read or is not Mach-O at all; any
/// narrower failure lands in [`Inspection::issues`].
pub fn inspect<R: Read + Seek>(source: &mut ByteSource<R>) -> Result<Inspection> {
    let len = source.len();
    if len < 4 {
        let magic = source.read_exact(0, len as usize)?;
        return Err(Error::NotMachO { magic });
    }

    let magic = read_magic(source, 0)?;
    let kind = Magic::classify(magic);
    debug!("magic {magic:02x?} classified as {kind:?}");

    match kind {
        Magic::Fat(width) => fat::parse(source, width),
        Magic::Thin(width, endian) => {
            let mut inspection = Inspection::default();
            match thin::parse(source, 0, len, width, endian) {
                Ok(image) => {
                    inspection.extend(None, image.issues);
                    inspection.records.push(image.record);
                }
                Err(error) => inspection.push(None, error),
            }
            Ok(inspection)
        }
        Magic::Unrecognized => Err(Error::NotMachO {
            magic: magic.to_vec(),
        }),
    }
}

pub(crate) fn read_magic<R: Read + Seek>(
    source: &mut ByteSource<R>,
    offset: u64,
) -> Result<[u8; 4]> {
    let bytes = source.read_exact(offset, 4)?;
    let mut magic = [0; 4];
    magic.copy_from_slice(&bytes);
    Ok(magic)
}
