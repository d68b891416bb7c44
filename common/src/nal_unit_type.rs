use std::fmt;

/// Definitions of `nal_unit_type` pulled from Table 7-1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NalUnitType {
    Unspecified,
    CodedSliceNonIDRPicture,
    CodedSliceDataPartitionA,
    CodedSliceDataPartitionB,
    CodedSliceDataPartitionC,
    CodedSliceIDRPicture,
    SupplementalEnhancementInformation,
    SequenceParameterSet,
    PictureParameterSet,
    AccessUnitDelimiter,
    SequenceEnd,
    StreamEnd,
    FillerData,
    SequenceParameterSetExtension,
    PrefixNALUnit,
    SubsetSequenceParameterSet,
    DepthParameterSet,
    Reserved,
    CodedSliceAuxiliaryCodedPictureNonPartitioning,
    CodedSliceExtension,
    CodedSliceExtensionDepthViewComponent,
}

impl NalUnitType {
    /// Only the low five bits of `nal_unit_type` are considered, so every input maps to a variant.
    pub fn from_nal_unit_type(nal_unit_type: u8) -> Self {
        match nal_unit_type & 0b0001_1111 {
            1 => NalUnitType::CodedSliceNonIDRPicture,
            2 => NalUnitType::CodedSliceDataPartitionA,
            3 => NalUnitType::CodedSliceDataPartitionB,
            4 => NalUnitType::CodedSliceDataPartitionC,
            5 => NalUnitType::CodedSliceIDRPicture,
            6 => NalUnitType::SupplementalEnhancementInformation,
            7 => NalUnitType::SequenceParameterSet,
            8 => NalUnitType::PictureParameterSet,
            9 => NalUnitType::AccessUnitDelimiter,
            10 => NalUnitType::SequenceEnd,
            11 => NalUnitType::StreamEnd,
            12 => NalUnitType::FillerData,
            13 => NalUnitType::SequenceParameterSetExtension,
            14 => NalUnitType::PrefixNALUnit,
            15 => NalUnitType::SubsetSequenceParameterSet,
            16 => NalUnitType::DepthParameterSet,
            17 | 18 | 22 | 23 => NalUnitType::Reserved,
            19 => NalUnitType::CodedSliceAuxiliaryCodedPictureNonPartitioning,
            20 => NalUnitType::CodedSliceExtension,
            21 => NalUnitType::CodedSliceExtensionDepthViewComponent,
            _ => NalUnitType::Unspecified,
        }
    }

    /// Slice and slice data partition units, i.e. the units carrying coded picture data.
    pub fn is_vcl(&self) -> bool {
        matches!(
            self,
            NalUnitType::CodedSliceNonIDRPicture
                | NalUnitType::CodedSliceDataPartitionA
                | NalUnitType::CodedSliceDataPartitionB
                | NalUnitType::CodedSliceDataPartitionC
                | NalUnitType::CodedSliceIDRPicture
        )
    }

    pub fn is_idr(&self) -> bool {
        *self == NalUnitType::CodedSliceIDRPicture
    }

    pub fn is_parameter_set(&self) -> bool {
        matches!(
            self,
            NalUnitType::SequenceParameterSet
                | NalUnitType::PictureParameterSet
                | NalUnitType::SequenceParameterSetExtension
                | NalUnitType::SubsetSequenceParameterSet
                | NalUnitType::DepthParameterSet
        )
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            NalUnitType::Unspecified => "unspecified",
            NalUnitType::CodedSliceNonIDRPicture => "slice",
            NalUnitType::CodedSliceDataPartitionA => "slice-dpa",
            NalUnitType::CodedSliceDataPartitionB => "slice-dpb",
            NalUnitType::CodedSliceDataPartitionC => "slice-dpc",
            NalUnitType::CodedSliceIDRPicture => "idr",
            NalUnitType::SupplementalEnhancementInformation => "sei",
            NalUnitType::SequenceParameterSet => "sps",
            NalUnitType::PictureParameterSet => "pps",
            NalUnitType::AccessUnitDelimiter => "aud",
            NalUnitType::SequenceEnd => "end-of-seq",
            NalUnitType::StreamEnd => "end-of-stream",
            NalUnitType::FillerData => "filler",
            NalUnitType::SequenceParameterSetExtension => "sps-ext",
            NalUnitType::PrefixNALUnit => "prefix",
            NalUnitType::SubsetSequenceParameterSet => "subset-sps",
            NalUnitType::DepthParameterSet => "dps",
            NalUnitType::Reserved => "reserved",
            NalUnitType::CodedSliceAuxiliaryCodedPictureNonPartitioning => "slice-aux",
            NalUnitType::CodedSliceExtension => "slice-ext",
            NalUnitType::CodedSliceExtensionDepthViewComponent => "slice-ext-depth",
        }
    }
}

impl From<u8> for NalUnitType {
    fn from(nal_unit_type: u8) -> Self {
        NalUnitType::from_nal_unit_type(nal_unit_type)
    }
}

impl fmt::Display for NalUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_7_1_boundaries() {
        assert_eq!(NalUnitType::from(0), NalUnitType::Unspecified);
        assert_eq!(NalUnitType::from(7), NalUnitType::SequenceParameterSet);
        assert_eq!(NalUnitType::from(8), NalUnitType::PictureParameterSet);
        assert_eq!(NalUnitType::from(17), NalUnitType::Reserved);
        assert_eq!(NalUnitType::from(19), NalUnitType::CodedSliceAuxiliaryCodedPictureNonPartitioning);
        assert_eq!(NalUnitType::from(23), NalUnitType::Reserved);
        assert_eq!(NalUnitType::from(24), NalUnitType::Unspecified);
        assert_eq!(NalUnitType::from(31), NalUnitType::Unspecified);
    }

    #[test]
    fn test_never_panics_above_five_bits() {
        // 0x65 carries nal_ref_idc bits, only the type bits count.
        assert_eq!(NalUnitType::from(0x65), NalUnitType::CodedSliceIDRPicture);
        assert_eq!(NalUnitType::from(0xFF), NalUnitType::Unspecified);
    }

    #[test]
    fn test_classification() {
        let vcl = (0..32u8)
            .filter(|t| NalUnitType::from(*t).is_vcl())
            .collect::<Vec<_>>();
        assert_eq!(vcl, vec![1, 2, 3, 4, 5]);

        assert!(NalUnitType::CodedSliceIDRPicture.is_idr());
        assert!(!NalUnitType::CodedSliceNonIDRPicture.is_idr());
        assert!(NalUnitType::SequenceParameterSet.is_parameter_set());
        assert!(NalUnitType::PictureParameterSet.is_parameter_set());
        assert!(!NalUnitType::SupplementalEnhancementInformation.is_parameter_set());
    }

    #[test]
    fn test_display() {
        assert_eq!(NalUnitType::SequenceParameterSet.to_string(), "sps");
        assert_eq!(NalUnitType::CodedSliceIDRPicture.to_string(), "idr");
    }
}
