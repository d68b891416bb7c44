use std::iter::FusedIterator;

use crate::cursor::{NalCursor, NalUnit};
use crate::errors::ByteStreamError;

/// Pairs every unit a [`NalCursor`] locates with its payload bytes, header byte included.
///
/// The payload runs from the unit's `data_offset` up to the next unit's `start_offset`, or to the
/// end of the buffer for the last unit. With a four byte start code, the leading zero of the
/// following code stays at the tail of the previous payload.
#[derive(Debug, Clone)]
pub struct Payloads<'a> {
    cursor: NalCursor<'a>,
}

impl<'a> Payloads<'a> {
    pub(crate) fn new(cursor: NalCursor<'a>) -> Self {
        Self { cursor }
    }
}

impl<'a> Iterator for Payloads<'a> {
    type Item = Result<(NalUnit, &'a [u8]), ByteStreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = match self.cursor.next()? {
            Ok(unit) => unit,
            Err(err) => return Some(Err(err)),
        };

        // the cursor only pre-positions at or past `data_offset`, and never past the buffer end
        let end = self.cursor.next_unit_offset();
        debug_assert!(unit.data_offset <= end && end <= self.cursor.data().len());

        let payload = self.cursor.data().get(unit.data_offset..end)?;

        Some(Ok((unit, payload)))
    }
}

impl FusedIterator for Payloads<'_> {}
