mod length_prefix;
mod nal_unit;
mod nal_unit_type;
mod start_code;

pub use length_prefix::read_length;
pub use nal_unit::{decode_header, NalUnitHeader, START_CODE_PREFIX};
pub use nal_unit_type::NalUnitType;
pub use start_code::{find_next_start_code, is_start_code_at, skip_zero_padding};
