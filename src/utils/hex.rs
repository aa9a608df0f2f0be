use thiserror::Error;

/// Errors from [`decode_hex`].
#[derive(Debug, Error, PartialEq)]
pub enum HexError {
    /// The input length disagrees with the declared byte count.
    #[error("expected a {expected} character hexstring, got {actual} characters")]
    Length { expected: usize, actual: usize },

    #[error("invalid hexstring: {0}")]
    Digit(#[from] hex::FromHexError),
}

/// Decode exactly `byte_count` bytes from `hexstring`, most significant
/// nibble first, case-insensitive.
///
/// The declared count is authoritative: an input of any other length is
/// rejected up front rather than partially decoded.
pub fn decode_hex(hexstring: &str, byte_count: usize) -> Result<Vec<u8>, HexError> {
    if hexstring.len() != 2 * byte_count {
        return Err(HexError::Length {
            expected: 2 * byte_count,
            actual: hexstring.len(),
        });
    }

    let mut bytes = vec![0u8; byte_count];
    hex::decode_to_slice(hexstring, &mut bytes)?;
    Ok(bytes)
}

/// Hex-encode `bytes` into a lowercase string.
///
/// The slice length is authoritative; the buffer is arbitrary binary data
/// and may contain zero bytes anywhere.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_at_the_declared_count() {
        let bytes = decode_hex("000102030405060708090a0b0c0d0e0f", 16).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(encode_hex(&bytes), "000102030405060708090a0b0c0d0e0f");
    }

    #[test]
    fn decoding_is_case_insensitive() {
        assert_eq!(decode_hex("DEADbeef", 4).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn rejects_length_mismatch() {
        assert_eq!(
            decode_hex(&"a".repeat(31), 16),
            Err(HexError::Length {
                expected: 32,
                actual: 31
            })
        );
        assert!(decode_hex(&"a".repeat(33), 16).is_err());
        assert!(decode_hex("", 16).is_err());
        assert!(decode_hex("abcd", 1).is_err());
    }

    #[test]
    fn rejects_bad_digits() {
        assert!(matches!(decode_hex("zz", 1), Err(HexError::Digit(_))));
        assert!(matches!(
            decode_hex("0g0102030405060708090a0b0c0d0e0f", 16),
            Err(HexError::Digit(_))
        ));
    }

    #[test]
    fn zero_bytes_survive_encoding() {
        assert_eq!(encode_hex(&[0x00, 0xab, 0x00]), "00ab00");
    }
}
