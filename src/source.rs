use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use crate::error::{Error, Result};

/// Random-access reads over one input.
///
/// Fat tables and slice headers point at absolute offsets in no particular
/// order, so every read seeks first.
pub struct ByteSource<R> {
    inner: R,
    len: u64,
}

impl ByteSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ByteSource<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self { inner, len })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    /// Reads exactly `length` bytes at `offset`, failing with
    /// [`Error::TruncatedInput`] before allocating if the input is too short.
    pub fn read_exact(&mut self, offset: u64, length: usize) -> Result<Vec<u8>> {
        let available = self.len.saturating_sub(offset);
        if length as u64 > available {
            return Err(Error::TruncatedInput {
                offset,
                requested: length as u64,
                available,
            });
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0; length];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}
