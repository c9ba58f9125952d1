//! Base64 XDR helpers.
//!
//! Every XDR value crossing a wire boundary (JSON-RPC params and results,
//! the backend protocol) travels as standard, padded base64 of its XDR
//! encoding.

use base64::{engine::general_purpose::STANDARD, Engine};
use stellar_xdr::curr::{Limits, ReadXdr, WriteXdr};

use crate::error::Result;

/// Maximum nesting depth accepted when decoding untrusted XDR.
pub const MAX_DECODE_DEPTH: u32 = 500;

/// Decoding limits for untrusted input of `len` bytes.
///
/// Bounding the length by the input size keeps a hostile length prefix from
/// triggering an oversized allocation.
pub fn decode_limits(len: usize) -> Limits {
    Limits {
        depth: MAX_DECODE_DEPTH,
        len,
    }
}

/// Encode an XDR value as base64.
pub fn to_base64<T: WriteXdr>(value: &T) -> Result<String> {
    let bytes = value.to_xdr(Limits::none())?;
    Ok(STANDARD.encode(bytes))
}

/// Decode standard base64 without interpreting the bytes.
///
/// Surrounding whitespace is not accepted.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded)?)
}

/// Decode an XDR value from base64.
///
/// The decoded bytes must be consumed exactly; trailing data is an error.
pub fn from_base64<T: ReadXdr>(encoded: &str) -> Result<T> {
    let bytes = decode_base64(encoded)?;
    let value = T::from_xdr(&bytes, decode_limits(bytes.len()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{ScVal, Uint256};

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = Uint256([1u8; 32]).to_xdr(Limits::none()).unwrap();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        let encoded = STANDARD.encode(bytes);
        assert!(from_base64::<Uint256>(&encoded).is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        assert!(matches!(
            from_base64::<ScVal>("not base64!"),
            Err(crate::Error::Base64(_))
        ));
    }

    #[test]
    fn test_decode_rejects_surrounding_whitespace() {
        assert!(from_base64::<ScVal>("AAAAAQ==").is_ok());
        assert!(from_base64::<ScVal>(" AAAAAQ==").is_err());
        assert!(from_base64::<ScVal>("AAAAAQ==\n").is_err());
        assert!(decode_base64("AAAAAQ== ").is_err());
    }

    #[test]
    fn test_scval_void_encoding() {
        assert_eq!(to_base64(&ScVal::Void).unwrap(), "AAAAAQ==");
    }
}
