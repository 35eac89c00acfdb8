use crate::error::TokenError;

const WORD: usize = std::mem::size_of::<u32>();

/// Reduce a digest to a 32-bit value.
///
/// The last four bytes, read little-endian, give an offset into the digest.
/// Four bytes starting at that offset, wrapping around the end, are read
/// little-endian as the result.
pub fn truncate(digest: &[u8]) -> Result<u32, TokenError> {
    if digest.is_empty() {
        return Err(TokenError::EmptyDigest);
    }

    // Digests shorter than a word only come from test hashes; read them circularly.
    let offset_start = digest.len().saturating_sub(WORD);
    let offset = read_u32_wrapping(digest, offset_start);
    let start = offset as usize % digest.len();

    Ok(read_u32_wrapping(digest, start))
}

/// Render a value as exactly `token_length` decimal characters.
///
/// Longer renderings keep their leading digits, shorter ones are left-padded
/// with `'0'`. Values sharing a decimal prefix of `token_length` digits
/// therefore render identically.
pub fn render_code(value: u32, token_length: usize) -> String {
    let digits = value.to_string();
    let kept = &digits[..digits.len().min(token_length)];
    format!("{:0>width$}", kept, width = token_length)
}

fn read_u32_wrapping(bytes: &[u8], start: usize) -> u32 {
    let mut word = [0u8; WORD];
    for (i, byte) in word.iter_mut().enumerate() {
        *byte = bytes[(start + i) % bytes.len()];
    }
    u32::from_le_bytes(word)
}
