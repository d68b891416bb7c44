use std::iter::FusedIterator;

use common::{
    decode_header, find_next_start_code, is_start_code_at, read_length, skip_zero_padding,
    NalUnitHeader, START_CODE_PREFIX,
};

use crate::errors::ByteStreamError;
use crate::payload::Payloads;

/// How NAL units are framed inside the buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Units are delimited by `0x000001` start code prefixes, possibly preceded by zero bytes.
    AnnexB,

    /// Each unit is preceded by a big-endian length field of the given width, 1 to 4 bytes.
    LengthPrefixed(u8),
}

impl ScanMode {
    /// Guesses the framing from the first bytes of `data`. A leading four byte start code means
    /// Annex B. A leading `0x000001` is also a 4-byte length of 256 to 511, so it means Annex B only
    /// if the buffer does not split exactly into 4-byte length prefixed units. Anything else is
    /// taken to be 4-byte length prefixed.
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x00, 0x00, 0x00, 0x01, ..] => ScanMode::AnnexB,
            [0x00, 0x00, 0x01, ..] if !tiles_as_length_prefixed(data) => ScanMode::AnnexB,
            _ => ScanMode::LengthPrefixed(4),
        }
    }

    /// Maps the `lengthSizeMinusOne` field of an AVC decoder configuration record. Only the low two
    /// bits are significant; the reserved upper bits are ignored.
    pub fn from_length_size_minus_one(byte: u8) -> Self {
        ScanMode::LengthPrefixed((byte & 0b11) + 1)
    }
}

/// Backs up from a start code over the zero bytes leading into it.
fn zero_run_start(data: &[u8], at: usize) -> usize {
    let mut start = at;
    while start > 0 && data[start - 1] == 0x00 {
        start -= 1;
    }
    start
}

fn tiles_as_length_prefixed(data: &[u8]) -> bool {
    let Ok(cursor) = NalCursor::new(data, ScanMode::LengthPrefixed(4)) else {
        return false;
    };

    let mut end = 0;
    for unit in cursor {
        match unit {
            Ok(unit) => end = unit.data_offset + unit.length.unwrap_or(0),
            Err(_) => return false,
        }
    }

    end == data.len()
}

/// A located NAL unit. Offsets index into the buffer the cursor was created over.
///
/// The unit ends where the next one starts, or at the end of the buffer for the last unit. Only
/// length prefixed framing carries an explicit `length`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NalUnit {
    /// The first start code byte, or the first length field byte.
    pub start_offset: usize,

    /// The header byte, i.e. the first byte past the start code or length field.
    pub data_offset: usize,

    pub header: NalUnitHeader,

    /// Declared payload size in bytes, header byte included. `None` for Annex B.
    pub length: Option<usize>,
}

#[derive(Debug, Copy, Clone)]
enum Framing {
    AnnexB { next_start: usize },
    LengthPrefixed { width: usize, next_unit: usize },
}

/// `NalCursor` walks the NAL units of a borrowed buffer, one call to [`NalCursor::advance`] per unit.
///
/// The cursor never copies the buffer. Once `advance` returns `Ok(false)` or an error, the cursor
/// is parked at the end of the buffer and every later call returns `Ok(false)`. To scan the same
/// buffer again, create a new cursor.
#[derive(Debug, Clone)]
pub struct NalCursor<'a> {
    data: &'a [u8],
    framing: Framing,
    unit: Option<NalUnit>,
}

impl<'a> NalCursor<'a> {
    /// In Annex B mode the cursor is pre-positioned on the zero padding leading into the first start
    /// code, so a buffer without one starts out exhausted. In length prefixed mode the first length
    /// field is expected at offset 0.
    pub fn new(data: &'a [u8], mode: ScanMode) -> Result<Self, ByteStreamError> {
        let framing = match mode {
            ScanMode::AnnexB => Framing::AnnexB {
                next_start: find_next_start_code(data, 0)
                    .map_or(data.len(), |at| zero_run_start(data, at)),
            },
            ScanMode::LengthPrefixed(width @ 1..=4) => Framing::LengthPrefixed {
                width: usize::from(width),
                next_unit: 0,
            },
            ScanMode::LengthPrefixed(width) => {
                return Err(ByteStreamError::InvalidLengthWidth(width));
            }
        };

        Ok(Self {
            data,
            framing,
            unit: None,
        })
    }

    pub fn mode(&self) -> ScanMode {
        match self.framing {
            Framing::AnnexB { .. } => ScanMode::AnnexB,
            // width was checked to be in 1..=4 on construction
            Framing::LengthPrefixed { width, .. } => ScanMode::LengthPrefixed(width as u8),
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The unit located by the last successful `advance`.
    pub fn unit(&self) -> Option<NalUnit> {
        self.unit
    }

    /// Where the unit after the current one begins, which is also where the current one ends.
    /// Equals the buffer length once no further unit is known.
    pub fn next_unit_offset(&self) -> usize {
        match self.framing {
            Framing::AnnexB { next_start } => next_start,
            Framing::LengthPrefixed { next_unit, .. } => next_unit,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_unit_offset() >= self.data.len()
    }

    /// Locates the next NAL unit and decodes its header.
    ///
    /// Returns `Ok(true)` if a unit was found, `Ok(false)` once the buffer holds no further unit,
    /// and `Err(..)` if a length field points past the end of the buffer.
    pub fn advance(&mut self) -> Result<bool, ByteStreamError> {
        let located = match self.framing {
            Framing::AnnexB { next_start } => self.locate_annex_b(next_start),
            Framing::LengthPrefixed { width, next_unit } => {
                self.locate_length_prefixed(width, next_unit)
            }
        };

        match located {
            Ok(Some(unit)) => {
                log::trace!(
                    "nal unit at {} (data {}): type {} ref_idc {}",
                    unit.start_offset,
                    unit.data_offset,
                    unit.header.nal_unit_type,
                    unit.header.nal_ref_idc
                );
                if unit.header.forbidden_bit_set() {
                    log::warn!(
                        "nal unit at {} has forbidden_zero_bit set",
                        unit.start_offset
                    );
                }

                self.unit = Some(unit);
                Ok(true)
            }
            Ok(None) => {
                log::debug!("no further nal unit in {} byte buffer", self.data.len());
                self.park();
                Ok(false)
            }
            Err(err) => {
                log::debug!("{err}");
                self.park();
                Err(err)
            }
        }
    }

    pub fn payloads(self) -> Payloads<'a> {
        Payloads::new(self)
    }

    fn park(&mut self) {
        let end = self.data.len();
        self.unit = None;
        self.framing = match self.framing {
            Framing::AnnexB { .. } => Framing::AnnexB { next_start: end },
            Framing::LengthPrefixed { width, .. } => Framing::LengthPrefixed {
                width,
                next_unit: end,
            },
        };
    }

    fn locate_annex_b(&mut self, from: usize) -> Result<Option<NalUnit>, ByteStreamError> {
        if from >= self.data.len() {
            return Ok(None);
        }

        // only the first unit can begin on padding; later positions come from the scanner already
        // aligned on the `0x000001`
        let start_offset = skip_zero_padding(self.data, from);
        if !is_start_code_at(self.data, start_offset) {
            return Ok(None);
        }

        let data_offset = start_offset + START_CODE_PREFIX.len();
        let next_start = find_next_start_code(self.data, data_offset).unwrap_or(self.data.len());

        self.framing = Framing::AnnexB { next_start };

        Ok(Some(NalUnit {
            start_offset,
            data_offset,
            // `is_start_code_at` guarantees a byte after the prefix
            header: decode_header(self.data[data_offset]),
            length: None,
        }))
    }

    fn locate_length_prefixed(
        &mut self,
        width: usize,
        at: usize,
    ) -> Result<Option<NalUnit>, ByteStreamError> {
        if at >= self.data.len() {
            return Ok(None);
        }

        let Some(declared) = read_length(self.data, at, width) else {
            return Ok(None);
        };
        let declared = declared as usize;
        let data_offset = at + width;
        let available = self.data.len() - data_offset;

        if declared == 0 {
            return Err(ByteStreamError::EmptyUnit { offset: at });
        }

        if declared > available {
            return Err(ByteStreamError::CorruptStream {
                offset: at,
                declared,
                available,
            });
        }

        self.framing = Framing::LengthPrefixed {
            width,
            next_unit: data_offset + declared,
        };

        Ok(Some(NalUnit {
            start_offset: at,
            data_offset,
            header: decode_header(self.data[data_offset]),
            length: Some(declared),
        }))
    }
}

impl Iterator for NalCursor<'_> {
    type Item = Result<NalUnit, ByteStreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.unit.map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl FusedIterator for NalCursor<'_> {}
