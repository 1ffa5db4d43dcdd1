use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The leading bytes match none of the thin or fat magic numbers.
    #[error("not a Mach-O file (magic {magic:02x?})")]
    NotMachO { magic: Vec<u8> },

    #[error(
        "truncated input: {requested} bytes requested at offset {offset:#x}, {available} available"
    )]
    TruncatedInput {
        offset: u64,
        requested: u64,
        available: u64,
    },

    #[error("unable to get architecture name for cputype {cputype:#x}, cpusubtype {cpusubtype:#x}")]
    UnresolvedArchitecture { cputype: i32, cpusubtype: i32 },

    /// Decoding stopped early; commands before `index` were kept.
    #[error("load command #{index} at offset {offset:#x}: {reason}")]
    TruncatedCommand {
        index: u32,
        offset: usize,
        reason: &'static str,
    },

    /// A single path field could not be extracted; decoding continued.
    #[error("load command #{index} ({cmd:#x}): {reason}")]
    BadCommandString {
        index: u32,
        cmd: u32,
        reason: &'static str,
    },

    #[error("slice {index} ({offset:#x}+{size:#x}) lies outside the file ({file_len:#x} bytes)")]
    SliceOutOfBounds {
        index: usize,
        offset: u64,
        size: u64,
        file_len: u64,
    },
}
