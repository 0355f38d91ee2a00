use thiserror::Error;

use crate::layout::StructVersion;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{version} record is undersized: need {need:#x} bytes, have {have:#x}")]
    Undersized {
        version: StructVersion,
        need: usize,
        have: usize,
    },

    #[error("no opcode field of width {width} — expected 2 (V1) or 4 (V2)")]
    UnsupportedOpcodeWidth { width: usize },

    #[error("unexpected end of record at offset {offset:#x} (need {need} bytes, have {have})")]
    UnexpectedEof {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("field at offset {offset:#x} is not decodable as {kind}: {message}")]
    FieldValue {
        offset: usize,
        kind: &'static str,
        message: String,
    },

    #[error("no field at offset {offset:#x}")]
    UnknownField { offset: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
