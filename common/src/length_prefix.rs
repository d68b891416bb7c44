/// Reads `width` bytes starting at `at` as a big-endian unsigned integer.
///
/// Returns `None` when fewer than `width` bytes remain or `width` is not in `1..=4`. The value is
/// not checked against the bytes left in `data`; that is up to the caller.
pub fn read_length(data: &[u8], at: usize, width: usize) -> Option<u32> {
    if !(1..=4).contains(&width) {
        return None;
    }

    let field = data.get(at..at.checked_add(width)?)?;

    Some(field.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
}
