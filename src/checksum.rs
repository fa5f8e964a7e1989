//! Checksum Codec
//!
//! CRC-32 (IEEE polynomial, the same value zlib produces) over raw payload
//! bytes. Used to detect torn or damaged log records, not as a security hash.

/// Width of a checksum field written by the log writer
pub const HEX_WIDTH: usize = 8;

/// Compute the checksum of a payload
pub fn compute(payload: &[u8]) -> u32 {
    crc32fast::hash(payload)
}

/// Recompute the checksum of `payload` and compare it with `checksum`
pub fn verify(checksum: u32, payload: &[u8]) -> bool {
    compute(payload) == checksum
}

/// Render a checksum as 8 lowercase hex digits
pub fn format_hex(checksum: u32) -> String {
    format!("{:08x}", checksum)
}

/// Parse a checksum field of 1 to 8 hex digits (either case)
///
/// Returns `None` for an empty field, a field that is too long, or any
/// non-hex character (including the sign that `from_str_radix` would accept).
pub fn parse_hex(field: &[u8]) -> Option<u32> {
    if field.is_empty() || field.len() > HEX_WIDTH {
        return None;
    }
    if !field.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(field).ok()?;
    u32::from_str_radix(text, 16).ok()
}
