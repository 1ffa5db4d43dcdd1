//! Bounds-checked walk of a load-command area.

use log::{debug, trace};

use crate::{
    error::Error,
    layout::{
        CommandHeader, Endian, LC_ID_DYLIB, LC_LOAD_DYLIB, LC_LOAD_WEAK_DYLIB, LC_RPATH,
        PATH_OFFSET_FIELD,
    },
};

/// What one image's load commands say about its linkage.
#[derive(Debug, Default)]
pub struct LoadCommands {
    pub install_name: Option<String>,
    pub dependencies: Vec<String>,
    pub search_paths: Vec<String>,
    /// Bytes of the command area covered by fully consumed commands.
    pub consumed: usize,
    pub issues: Vec<Error>,
}

/// Decodes up to `ncmds` commands from `buf`, which holds exactly the
/// `sizeofcmds` bytes following the header.
///
/// A header or size that would run past `buf` ends the walk; everything
/// decoded before that point is kept. A bad path inside one command only
/// drops that path.
pub fn decode(buf: &[u8], ncmds: u32, endian: Endian) -> LoadCommands {
    let mut out = LoadCommands::default();
    let mut cursor = 0usize;

    for index in 0..ncmds {
        let remaining = &buf[cursor..];
        let header = match CommandHeader::parse(remaining, endian) {
            Some(header) => header,
            None => {
                out.truncated(index, cursor, "command header runs past the command area");
                break;
            }
        };

        let size = header.cmdsize as usize;
        if size < CommandHeader::SIZE {
            out.truncated(index, cursor, "command size is smaller than its header");
            break;
        }
        if size > remaining.len() {
            out.truncated(index, cursor, "command size runs past the command area");
            break;
        }

        let command = &remaining[..size];
        trace!("load command #{index}: cmd {:#x}, size {size}, at {cursor:#x}", header.cmd);

        match header.cmd {
            LC_LOAD_DYLIB | LC_LOAD_WEAK_DYLIB => {
                if let Some(path) = out.path(index, header.cmd, command, endian) {
                    out.dependencies.push(path);
                }
            }
            LC_RPATH => {
                if let Some(path) = out.path(index, header.cmd, command, endian) {
                    out.search_paths.push(path);
                }
            }
            LC_ID_DYLIB => {
                if let Some(path) = out.path(index, header.cmd, command, endian) {
                    if let Some(previous) = out.install_name.replace(path) {
                        debug!("install name '{previous}' replaced by a later LC_ID_DYLIB");
                    }
                }
            }
            _ => {}
        }

        cursor += size;
        out.consumed = cursor;
    }

    out
}

impl LoadCommands {
    fn truncated(&mut self, index: u32, offset: usize, reason: &'static str) {
        self.issues.push(Error::TruncatedCommand {
            index,
            offset,
            reason,
        });
    }

    fn path(&mut self, index: u32, cmd: u32, command: &[u8], endian: Endian) -> Option<String> {
        match path_at(command, endian) {
            Ok(path) => Some(path),
            Err(reason) => {
                self.issues.push(Error::BadCommandString { index, cmd, reason });
                None
            }
        }
    }
}

/// Extracts the NUL-terminated string an `lc_str` offset points at, keeping
/// both the offset and the terminator inside `command`.
fn path_at(command: &[u8], endian: Endian) -> Result<String, &'static str> {
    let offset = endian
        .read_u32(command, PATH_OFFSET_FIELD)
        .ok_or("command too small to hold a path offset")? as usize;
    let tail = command
        .get(offset..)
        .filter(|tail| !tail.is_empty())
        .ok_or("path offset points outside the command")?;
    let len = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or("path is not NUL-terminated within the command")?;
    Ok(String::from_utf8_lossy(&tail[..len]).into_owned())
}
