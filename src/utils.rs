use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{error_codes, CryptoError};

/// Generate cryptographically secure random bytes of the specified length
///
/// Uses the operating system's secure random number generator (OsRng). The
/// resulting bytes are suitable for key generation seeds and the optional
/// randomized-signing seed.
///
/// # Arguments
///
/// * `length` - The number of random bytes to generate
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - A vector containing the random bytes
/// * `Err(CryptoError)` - If random generation fails
pub fn random_bytes(length: usize) -> Result<Vec<u8>, CryptoError> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::RandomGenerationError {
            cause: e.to_string(),
            error_code: error_codes::RNG_SOURCE_FAILED,
        })?;
    Ok(bytes)
}

/// Perform constant-time comparison of two byte slices to prevent timing attacks
///
/// The time taken is independent of the content of the slices, which matters
/// when comparing values derived from secrets (for example the challenge hash
/// during signature verification).
///
/// # Arguments
///
/// * `a` - First byte slice
/// * `b` - Second byte slice
///
/// # Returns
///
/// * `true` if the slices are equal
/// * `false` if the slices differ in length or content
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

/// Securely erase sensitive data from memory
///
/// Uses the zeroize crate, which resists compiler optimizations that might
/// otherwise remove "unnecessary" memory writes.
pub fn secure_zero(data: &mut [u8]) {
    data.zeroize();
}

/// Convert a byte array to a lowercase hexadecimal string
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Convert a hexadecimal string to a byte array
///
/// Expects a valid hexadecimal string with an even number of characters.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The parsed bytes
/// * `Err(CryptoError)` - If the string has an odd length or contains invalid characters
pub fn from_hex(hex: &str) -> Result<Vec<u8>, CryptoError> {
    if hex.len() % 2 != 0 {
        return Err(CryptoError::SerializationError(
            "Hex string must have an even number of characters".to_string(),
        ));
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| {
                CryptoError::SerializationError(format!(
                    "Invalid hex characters at position {}",
                    i
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_length_and_variability() {
        let a = random_bytes(32).unwrap();
        let b = random_bytes(32).unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(b.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }

    #[test]
    fn test_secure_zero() {
        let mut data = vec![0xAAu8; 16];
        secure_zero(&mut data);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_hex_round_trip() {
        let bytes = vec![0x00, 0x7f, 0xff, 0x10];
        let hex = to_hex(&bytes);
        assert_eq!(hex, "007fff10");
        assert_eq!(from_hex(&hex).unwrap(), bytes);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(from_hex("abc").is_err());
        assert!(from_hex("zz").is_err());
    }
}
