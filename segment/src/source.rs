use std::fs::File;
use std::path::Path;

use memmap::Mmap;

use crate::cursor::{NalCursor, ScanMode};
use crate::errors::DecodingError;

/// A read-only memory mapping of an elementary stream file. Cursors borrow from it, so the
/// mapping always outlives them.
pub struct MappedStream {
    // empty files cannot be mapped
    data: Option<Mmap>,
}

impl MappedStream {
    pub fn from_file(file: File) -> Result<Self, DecodingError> {
        if file.metadata()?.len() == 0 {
            return Ok(Self { data: None });
        }

        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { data: Some(mmap) })
    }

    pub fn from_file_path(file_path: impl AsRef<Path>) -> Result<Self, DecodingError> {
        let file = File::open(file_path)?;
        MappedStream::from_file(file)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn cursor(&self, mode: ScanMode) -> Result<NalCursor<'_>, DecodingError> {
        Ok(NalCursor::new(self.as_bytes(), mode)?)
    }
}
