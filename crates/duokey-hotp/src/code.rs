// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RFC 4226 HOTP computation over a base32-encoded seed.

use duokey_core::DuokeyError;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Number of decimal digits in a generated code.
pub const DEFAULT_DIGITS: u32 = 6;

/// Compute the HOTP code for a base32-encoded seed and counter.
///
/// `digits` must be between 1 and 9; the truncated value is 31 bits, so
/// wider codes are meaningless and `10^digits` would overflow.
pub fn hotp(seed: &str, counter: u64, digits: u32) -> Result<String, DuokeyError> {
    if !(1..=9).contains(&digits) {
        return Err(DuokeyError::Internal(format!(
            "unsupported HOTP digit count: {digits}"
        )));
    }
    let key = decode_base32_seed(seed)?;
    Ok(hotp_raw(&key, counter, digits))
}

/// HOTP over raw key bytes: HMAC-SHA1 of the big-endian counter, dynamic
/// truncation, decimal reduction, zero-padded to `digits`.
fn hotp_raw(secret: &[u8], counter: u64, digits: u32) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret).expect("HMAC-SHA1 accepts keys of any length");
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    let code = binary % 10u32.pow(digits);
    format!("{code:0width$}", width = digits as usize)
}

/// Encode raw seed bytes as base32, the form [`hotp`] consumes.
pub fn encode_base32_seed(bytes: &[u8]) -> String {
    data_encoding::BASE32.encode(bytes)
}

/// Decode a base32 seed string into raw key bytes.
///
/// Whitespace is stripped and case normalized before decoding; trailing
/// `=` padding is accepted.
pub fn decode_base32_seed(seed: &str) -> Result<Vec<u8>, DuokeyError> {
    let normalized: String = seed
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    data_encoding::BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map_err(|_| DuokeyError::Vault("HOTP seed is not valid base32".to_string()))
}
