use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("formatted section is too short: {len} bytes, need at least {min}")]
    InputTooShort { len: usize, min: usize },

    #[error("structure type {found} is not a memory device")]
    UnexpectedType { found: u8 },

    #[error("structure at offset {offset} is truncated: {reason}")]
    TruncatedStructure { offset: usize, reason: &'static str },

    #[error("structure at offset {offset} declares length {length}, smaller than its header")]
    MalformedHeader { offset: usize, length: u8 },
}
