mod cursor;
mod errors;
mod payload;
mod source;

pub use common::{NalUnitHeader, NalUnitType};
pub use cursor::{NalCursor, NalUnit, ScanMode};
pub use errors::{ByteStreamError, DecodingError};
pub use payload::Payloads;
pub use source::MappedStream;
