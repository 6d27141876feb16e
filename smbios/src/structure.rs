use super::error::Error;
use bytes::{Buf, Bytes};
use tracing::{debug, trace};

pub const HEADER_LENGTH: usize = 4;

pub const TYPE_MEMORY_DEVICE: u8 = 17;
pub const TYPE_END_OF_TABLE: u8 = 127;

/// One structure of an SMBIOS structure table, split into its formatted section (header
/// stripped) and its string set.
#[derive(Debug, Clone)]
pub struct RawStructure {
    pub ty: u8,
    pub length: u8,
    pub handle: u16,
    pub formatted: Bytes,
    pub strings: Vec<String>,
}

impl RawStructure {
    /// Splits the structure at the front of `buf` and advances `buf` past its string set.
    ///
    /// `offset` is only used for error reporting.
    pub fn parse(buf: &mut Bytes, offset: usize) -> Result<Self, Error> {
        if buf.remaining() < HEADER_LENGTH {
            return Err(Error::TruncatedStructure {
                offset,
                reason: "header",
            });
        }

        let ty = buf.get_u8();
        let length = buf.get_u8();
        let handle = buf.get_u16_le();

        let body_length = (length as usize)
            .checked_sub(HEADER_LENGTH)
            .ok_or(Error::MalformedHeader { offset, length })?;
        if buf.remaining() < body_length {
            return Err(Error::TruncatedStructure {
                offset,
                reason: "formatted section",
            });
        }

        let formatted = buf.split_to(body_length);
        let strings = split_string_set(buf).ok_or(Error::TruncatedStructure {
            offset,
            reason: "string set",
        })?;

        Ok(RawStructure {
            ty,
            length,
            handle,
            formatted,
            strings,
        })
    }
}

/// 1-based lookup; index 0 means "no string".
pub fn get_string_by_index<S: AsRef<str>>(strings: &[S], index: u8) -> Option<&str> {
    if index < 1 {
        return None;
    }

    let i: usize = (index as usize) - 1;
    strings.get(i).map(|s| s.as_ref())
}

// The string set is a run of NUL-terminated strings closed by one more NUL. A structure
// without strings carries just the two NULs.
fn split_string_set(buf: &mut Bytes) -> Option<Vec<String>> {
    let end = buf.windows(2).position(|w| w == [0, 0])?;
    let set = buf.split_to(end);
    buf.advance(2);

    if set.is_empty() {
        return Some(vec![]);
    }

    let strings = set
        .split(|c| *c == 0)
        .map(|v| String::from_utf8_lossy(v).to_string())
        .collect();

    Some(strings)
}

/// Iterates the structures of a table, stopping after the end-of-table structure.
///
/// The first error ends the iteration.
pub struct Structures {
    data: Bytes,
    offset: usize,
    done: bool,
}

impl Structures {
    pub fn new(data: Bytes) -> Self {
        Structures {
            data,
            offset: 0,
            done: false,
        }
    }
}

impl Iterator for Structures {
    type Item = Result<RawStructure, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.data.is_empty() {
            return None;
        }

        let before = self.data.remaining();
        let structure = match RawStructure::parse(&mut self.data, self.offset) {
            Ok(s) => s,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        trace!(
            offset = self.offset,
            ty = structure.ty,
            handle = structure.handle,
            "structure"
        );
        self.offset += before - self.data.remaining();

        if structure.ty == TYPE_END_OF_TABLE {
            debug!(offset = self.offset, "end of table");
            self.done = true;
        }

        Some(Ok(structure))
    }
}
