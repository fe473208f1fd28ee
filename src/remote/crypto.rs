//! AES-256-CBC decryption of the configuration blob.
//!
//! The blob carries no padding scheme: the plaintext is zero-filled to the
//! block size and the filler is trimmed after decryption together with
//! surrounding whitespace.

// ============================================================================
// Imports
// ============================================================================

use aes::Aes256;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Length of the IV prepended to the ciphertext.
pub const IV_LEN: usize = 16;

/// Required key length (AES-256).
pub const KEY_LEN: usize = 32;

/// AES block size.
const BLOCK_LEN: usize = 16;

type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;

// ============================================================================
// Public Functions
// ============================================================================

/// Decrypts a base64 configuration blob into its JSON text.
///
/// # Errors
///
/// - [`Error::Base64`] if `encoded` is not standard base64
/// - [`Error::Crypto`] if the key is not 32 bytes or the ciphertext is
///   not a whole number of blocks
pub fn decrypt_payload(encoded: &str, key: &[u8]) -> Result<String> {
    let bytes = STANDARD.decode(encoded.trim())?;

    if bytes.len() < IV_LEN {
        return Err(Error::crypto(format!(
            "blob too short: {} bytes, IV alone is {IV_LEN}",
            bytes.len()
        )));
    }

    let (iv, ciphertext) = bytes.split_at(IV_LEN);
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(Error::crypto(format!(
            "ciphertext length {} is not a multiple of {BLOCK_LEN}",
            ciphertext.len()
        )));
    }

    let decryptor = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| Error::crypto(format!("key must be {KEY_LEN} bytes, got {}", key.len())))?;

    let mut buf = ciphertext.to_vec();
    let plaintext = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| Error::crypto("ciphertext could not be decrypted"))?;

    let text = String::from_utf8_lossy(plaintext);
    Ok(text.trim_matches(|c: char| c <= ' ').to_string())
}

/// Produces a blob [`decrypt_payload`] accepts.
///
/// Mirrors what the configuration endpoint does; mainly useful for
/// fixtures.
///
/// # Errors
///
/// Returns [`Error::Crypto`] if the key is not 32 bytes.
pub fn encrypt_payload(plaintext: &str, key: &[u8], iv: &[u8; IV_LEN]) -> Result<String> {
    let encryptor = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|_| Error::crypto(format!("key must be {KEY_LEN} bytes, got {}", key.len())))?;

    let mut buf = plaintext.as_bytes().to_vec();
    let padded_len = buf.len().div_ceil(BLOCK_LEN).max(1) * BLOCK_LEN;
    buf.resize(padded_len, 0);

    let ciphertext = encryptor
        .encrypt_padded_mut::<NoPadding>(&mut buf, padded_len)
        .map_err(|_| Error::crypto("plaintext could not be encrypted"))?;

    let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
    blob.extend_from_slice(iv);
    blob.extend_from_slice(ciphertext);

    Ok(STANDARD.encode(blob))
}

// ============================================================================
// Tests
// ============================================================================
