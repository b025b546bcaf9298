//! # Base64 Encoding/Decoding
//!
//! Standard-alphabet base64, the encoding wallets and RPC nodes use for
//! serialized transactions.

use base64::{Engine as _, engine::general_purpose};

/// Encode bytes to a padded base64 string.
pub fn b64_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Decode a padded base64 string to bytes.
pub fn b64_decode(b64: &str) -> Result<Vec<u8>, Error> {
    general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|_| Error::FailToB64Decode)
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64Decode,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b64_decode_rejects_garbage() {
        assert!(b64_decode("not base64 !!").is_err());
    }

    #[test]
    fn test_b64_encode_padding() {
        assert_eq!(b64_encode([1u8, 2]), "AQI=");
        assert_eq!(b64_decode(" AQI= ").unwrap(), vec![1u8, 2]);
    }
}
