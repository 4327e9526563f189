// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-based key derivation and AES-256-CBC encrypt/decrypt.
//!
//! Derives a 32-byte key via PBKDF2-HMAC-SHA256 with 100,000 iterations.
//! Encryption prefixes a fresh random 16-byte IV to the ciphertext; the
//! on-disk blob is always `iv || ciphertext` with PKCS#7 padding.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use duokey_core::DuokeyError;
use pbkdf2::pbkdf2_hmac;
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive a 32-byte key from a password and salt.
///
/// Deterministic: the same (password, salt) pair always yields the same
/// key. The returned key is wrapped in [`Zeroizing`] for automatic memory
/// zeroing on drop.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], DuokeyError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| DuokeyError::Vault("failed to generate random salt".to_string()))?;
    Ok(salt)
}

/// Re-derive a key from (password, salt) and compare to `key`.
///
/// A cheap early-exit check for callers holding a previously derived key.
/// `Vault::open` skips it: the key there is derived immediately before
/// decrypting, so the check would always pass and only add a second PBKDF2
/// run. The authoritative password check is whether [`decrypt`] plus JSON
/// parsing of the stored ciphertext succeeds.
pub fn verify_key(key: &[u8; KEY_LEN], password: &[u8], salt: &[u8; SALT_LEN]) -> bool {
    let derived = derive_key(password, salt);
    ring::constant_time::verify_slices_are_equal(&*derived, key).is_ok()
}

/// Encrypt plaintext with AES-256-CBC. Returns `iv || ciphertext`.
pub fn encrypt(plaintext: &[u8], key: &[u8; KEY_LEN]) -> Result<Vec<u8>, DuokeyError> {
    let rng = SystemRandom::new();
    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv)
        .map_err(|_| DuokeyError::Vault("failed to generate random IV".to_string()))?;

    let cipher = Aes256CbcEnc::new(key.into(), (&iv).into());
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt an `iv || ciphertext` blob.
///
/// Fails with [`DuokeyError::Decryption`] when the padding does not check
/// out: wrong key, truncated blob, or corrupted bytes.
pub fn decrypt(blob: &[u8], key: &[u8; KEY_LEN]) -> Result<Vec<u8>, DuokeyError> {
    if blob.len() <= IV_LEN || (blob.len() - IV_LEN) % IV_LEN != 0 {
        return Err(DuokeyError::Decryption);
    }
    let (iv, ciphertext) = blob.split_at(IV_LEN);

    let cipher = Aes256CbcDec::new(key.into(), iv.into());
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DuokeyError::Decryption)
}
