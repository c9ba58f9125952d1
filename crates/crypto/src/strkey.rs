//! Stellar StrKey encoding and decoding.
//!
//! A StrKey is `base32(version || payload || crc16(version || payload))`
//! using the RFC 4648 alphabet without padding. The version byte selects the
//! leading character.
//!
//! | Prefix | Type |
//! |--------|------|
//! | G | Account ID |
//! | S | Secret Seed |
//! | M | Muxed Account |
//! | C | Contract |
//!
//! # Example
//!
//! ```
//! use soroban_rpc_crypto::{encode_account_id, decode_account_id};
//!
//! let key = [0u8; 32];
//! let strkey = encode_account_id(&key);
//! assert!(strkey.starts_with('G'));
//! assert_eq!(decode_account_id(&strkey).unwrap(), key);
//! ```

use crate::error::CryptoError;

/// Version byte for account IDs (produces 'G' prefix).
const VERSION_ACCOUNT_ID: u8 = 6 << 3;
/// Version byte for secret seeds (produces 'S' prefix).
const VERSION_SEED: u8 = 18 << 3;
/// Version byte for muxed accounts (produces 'M' prefix).
const VERSION_MUXED_ACCOUNT: u8 = 12 << 3;
/// Version byte for contracts (produces 'C' prefix).
const VERSION_CONTRACT: u8 = 2 << 3;

/// Encodes an Ed25519 public key as a Stellar account ID (G...).
pub fn encode_account_id(key: &[u8; 32]) -> String {
    encode_check(VERSION_ACCOUNT_ID, key)
}

/// Decodes a Stellar account ID (G...) to raw key bytes.
pub fn decode_account_id(s: &str) -> Result<[u8; 32], CryptoError> {
    decode_check(VERSION_ACCOUNT_ID, s)
}

/// Encodes an Ed25519 secret key as a Stellar seed (S...).
pub fn encode_secret_seed(seed: &[u8; 32]) -> String {
    encode_check(VERSION_SEED, seed)
}

/// Decodes a Stellar seed (S...) to raw key bytes.
pub fn decode_secret_seed(s: &str) -> Result<[u8; 32], CryptoError> {
    decode_check(VERSION_SEED, s)
}

/// Encodes a contract identifier (C...).
pub fn encode_contract(id: &[u8; 32]) -> String {
    encode_check(VERSION_CONTRACT, id)
}

/// Decodes a contract identifier (C...).
pub fn decode_contract(s: &str) -> Result<[u8; 32], CryptoError> {
    decode_check(VERSION_CONTRACT, s)
}

/// Encodes a muxed account (M...): the account key followed by the
/// big-endian 64-bit sub-account id.
pub fn encode_muxed_account(key: &[u8; 32], id: u64) -> String {
    let mut data = key.to_vec();
    data.extend_from_slice(&id.to_be_bytes());
    encode_check(VERSION_MUXED_ACCOUNT, &data)
}

/// Decodes a muxed account (M...) to key bytes and sub-account id.
pub fn decode_muxed_account(s: &str) -> Result<([u8; 32], u64), CryptoError> {
    let data = decode_payload(VERSION_MUXED_ACCOUNT, s)?;
    if data.len() != 40 {
        return Err(CryptoError::InvalidLength {
            expected: 40,
            got: data.len(),
        });
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&data[..32]);
    let mut id = [0u8; 8];
    id.copy_from_slice(&data[32..]);
    Ok((key, u64::from_be_bytes(id)))
}

fn encode_check(version: u8, data: &[u8]) -> String {
    let mut payload = vec![version];
    payload.extend_from_slice(data);

    // CRC16-XModem checksum, little-endian
    let checksum = crc16_xmodem(&payload);
    payload.extend_from_slice(&checksum.to_le_bytes());

    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &payload)
}

fn decode_check(expected_version: u8, s: &str) -> Result<[u8; 32], CryptoError> {
    let data = decode_payload(expected_version, s)?;
    data.as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            expected: 32,
            got: data.len(),
        })
}

/// Decodes a StrKey, verifying version and checksum, and returns the payload.
fn decode_payload(expected_version: u8, s: &str) -> Result<Vec<u8>, CryptoError> {
    let decoded = base32::decode(base32::Alphabet::Rfc4648 { padding: false }, s)
        .ok_or_else(|| CryptoError::InvalidStrKey("invalid base32".to_string()))?;

    // 1 version byte + 2 checksum bytes
    if decoded.len() < 3 {
        return Err(CryptoError::InvalidStrKey("too short".to_string()));
    }

    let version = decoded[0];
    if version != expected_version {
        return Err(CryptoError::InvalidStrKey(format!(
            "version byte {:02x} != {:02x}",
            version, expected_version
        )));
    }

    let checksum_pos = decoded.len() - 2;
    let checksum = u16::from_le_bytes([decoded[checksum_pos], decoded[checksum_pos + 1]]);
    if checksum != crc16_xmodem(&decoded[..checksum_pos]) {
        return Err(CryptoError::InvalidStrKey("checksum mismatch".to_string()));
    }

    Ok(decoded[1..checksum_pos].to_vec())
}

/// CRC16-XModem: polynomial 0x1021, initial value 0.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}
