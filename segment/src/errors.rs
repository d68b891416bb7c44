use std::io;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ByteStreamError {
    #[error("Invalid length prefix width: {0}. Expected a width of 1 to 4 bytes.")]
    InvalidLengthWidth(u8),

    #[error(
        "Corrupt stream: unit at offset {offset} declares {declared} payload bytes but only {available} remain."
    )]
    CorruptStream {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("Corrupt stream: unit at offset {offset} declares an empty payload.")]
    EmptyUnit { offset: usize },
}

#[derive(Error, Debug)]
pub enum DecodingError {
    #[error("An error occurred when opening the file")]
    FileError(#[from] io::Error),

    #[error("An error occurred reading from the nal unit stream buffer")]
    BytestreamError(#[from] ByteStreamError),
}
