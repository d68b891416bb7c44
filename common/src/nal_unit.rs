use crate::nal_unit_type::NalUnitType;

/// A unique sequence of three bytes equal to `0x000001` embedded in the byte stream as a prefix
/// to each NAL unit. The location of a `START_CODE_PREFIX` can be used by a decoder to identify
/// the beginning of a new NAL unit and the end of a previous NAL unit.
pub const START_CODE_PREFIX: [u8; 3] = [0x00, 0x00, 0x01];

/// The one-byte header leading every NAL unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NalUnitHeader {
    /// `forbidden_zero_bit` shall be equal to 0. It is carried through as read and never validated.
    pub forbidden_zero_bit: u8,

    /// `nal_ref_idc` not equal to 0 specifies that the content of the NAL unit contains a sequence
    /// parameter set, a picture parameter set, a slice of a reference picture, or a slice data
    /// partition of a reference picture.
    ///
    /// `nal_ref_idc` shall be equal to 0 for all NAL units having `nal_unit_type` equal to
    /// 6, 9, 10, 11, or 12.
    pub nal_ref_idc: u8,

    /// `nal_unit_type` specifies the type of RBSP data structure contained in the NAL unit.
    /// Always in `0..=31`.
    pub nal_unit_type: u8,
}

impl NalUnitHeader {
    pub fn unit_type(&self) -> NalUnitType {
        NalUnitType::from_nal_unit_type(self.nal_unit_type)
    }

    pub fn forbidden_bit_set(&self) -> bool {
        self.forbidden_zero_bit != 0
    }
}

/// Splits a NAL unit header byte into its three fields.
///
/// ```text
/// bit   7   6 5   4 3 2 1 0
///     +---+-----+-----------+
///     | F | NRI |   type    |
///     +---+-----+-----------+
/// ```
pub fn decode_header(byte: u8) -> NalUnitHeader {
    NalUnitHeader {
        forbidden_zero_bit: byte >> 7,
        nal_ref_idc: (byte >> 5) & 0b11,
        nal_unit_type: byte & 0b0001_1111,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_sps_header() {
        let header = decode_header(0x67);

        assert_eq!(header.forbidden_zero_bit, 0);
        assert_eq!(header.nal_ref_idc, 3);
        assert_eq!(header.nal_unit_type, 7);
        assert_eq!(header.unit_type(), NalUnitType::SequenceParameterSet);
    }

    #[test]
    fn test_decode_idr_and_non_ref_slice() {
        let idr = decode_header(0x65);
        assert_eq!(idr.nal_ref_idc, 3);
        assert_eq!(idr.unit_type(), NalUnitType::CodedSliceIDRPicture);

        let non_ref = decode_header(0x01);
        assert_eq!(non_ref.nal_ref_idc, 0);
        assert_eq!(non_ref.unit_type(), NalUnitType::CodedSliceNonIDRPicture);
    }

    #[test]
    fn test_forbidden_bit_is_passed_through() {
        let header = decode_header(0xE8);

        assert!(header.forbidden_bit_set());
        assert_eq!(header.forbidden_zero_bit, 1);
        assert_eq!(header.nal_ref_idc, 3);
        assert_eq!(header.nal_unit_type, 8);
    }

    #[test]
    fn test_fields_stay_in_range() {
        for byte in 0..=u8::MAX {
            let header = decode_header(byte);
            assert!(header.forbidden_zero_bit <= 1);
            assert!(header.nal_ref_idc <= 3);
            assert!(header.nal_unit_type <= 31);
            assert_eq!(
                (header.forbidden_zero_bit << 7) | (header.nal_ref_idc << 5) | header.nal_unit_type,
                byte
            );
        }
    }
}
