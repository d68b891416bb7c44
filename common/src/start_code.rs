use crate::nal_unit::START_CODE_PREFIX;

/// Width of the window tested at each position: the three start code bytes plus the header
/// byte that must follow them.
const WINDOW: usize = START_CODE_PREFIX.len() + 1;

/// Whether `data[at..at + 3]` is a `START_CODE_PREFIX` that is followed by at least one more byte.
///
/// A prefix sitting in the last three bytes of `data` has no room for a NAL unit header, and is
/// not reported.
pub fn is_start_code_at(data: &[u8], at: usize) -> bool {
    matches!(
        at.checked_add(WINDOW).and_then(|end| data.get(at..end)),
        Some([0x00, 0x00, 0x01, _])
    )
}

/// Scans forward one byte at a time from `from` and returns the offset of the first
/// `START_CODE_PREFIX`, or `None` if there is none with a header byte after it.
pub fn find_next_start_code(data: &[u8], from: usize) -> Option<usize> {
    let last = data.len().checked_sub(WINDOW)?;

    (from..=last).find(|&i| data[i] == 0x00 && data[i + 1] == 0x00 && data[i + 2] == 0x01)
}

/// Extracts and discards each 0x00 byte that does not itself begin a start code, moving the
/// position forward until it sits on the first 0x00 of a `START_CODE_PREFIX`, on a non-zero
/// byte, or at the end of `data`.
///
/// ```text
///   0x00 0x00 0x00 0x01 0x67
///   |    | <-- returned here
///   from
/// ```
pub fn skip_zero_padding(data: &[u8], from: usize) -> usize {
    let mut cursor = from;

    while cursor < data.len() && data[cursor] == 0x00 && !is_start_code_at(data, cursor) {
        cursor += 1;
    }

    cursor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_three_byte_prefix() {
        let data = [0x00, 0x00, 0x01, 0x67, 0x42];
        assert_eq!(find_next_start_code(&data, 0), Some(0));
    }

    #[test]
    fn test_find_four_byte_prefix_lands_on_last_three() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x67];
        assert_eq!(find_next_start_code(&data, 0), Some(1));
    }

    #[test]
    fn test_find_respects_from() {
        let data = [
            0x00, 0x00, 0x01, 0x67, 0xAA, // sps
            0x00, 0x00, 0x01, 0x68, 0xBB, // pps
        ];

        assert_eq!(find_next_start_code(&data, 1), Some(5));
        assert_eq!(find_next_start_code(&data, 6), None);
    }

    #[test]
    fn test_find_ignores_prefix_without_header_byte() {
        // the prefix occupies the final three bytes, so no header can follow it
        let data = [0x67, 0xAA, 0x00, 0x00, 0x01];
        assert_eq!(find_next_start_code(&data, 0), None);

        let data = [0x00, 0x00, 0x01];
        assert_eq!(find_next_start_code(&data, 0), None);
    }

    #[test]
    fn test_find_on_short_or_empty_input() {
        assert_eq!(find_next_start_code(&[], 0), None);
        assert_eq!(find_next_start_code(&[0x00, 0x00], 0), None);
        assert_eq!(find_next_start_code(&[0x00, 0x00, 0x01, 0x09], 10), None);
    }

    #[test]
    fn test_emulation_prevented_bytes_are_not_prefixes() {
        let data = [0x65, 0x00, 0x00, 0x03, 0x01, 0x00, 0x00, 0x02, 0x11];
        assert_eq!(find_next_start_code(&data, 0), None);
    }

    #[test]
    fn test_is_start_code_at() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x67];

        assert!(!is_start_code_at(&data, 0));
        assert!(is_start_code_at(&data, 1));
        assert!(!is_start_code_at(&data, 2));
        assert!(!is_start_code_at(&data, usize::MAX));
    }

    #[test]
    fn test_skip_zero_padding() {
        let data = [0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x67];
        assert_eq!(skip_zero_padding(&data, 0), 3);

        let aligned = [0x00, 0x00, 0x01, 0x67];
        assert_eq!(skip_zero_padding(&aligned, 0), 0);

        let all_zero = [0x00; 6];
        assert_eq!(skip_zero_padding(&all_zero, 0), all_zero.len());

        let non_zero = [0x42, 0x00, 0x00, 0x01, 0x67];
        assert_eq!(skip_zero_padding(&non_zero, 0), 0);
    }
}
