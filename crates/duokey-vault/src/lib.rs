// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-CBC encrypted credential vault for the Duokey authenticator.
//!
//! The vault is a single binary file: a 4-byte format marker, a 16-byte
//! PBKDF2 salt, and the AES-256-CBC ciphertext (IV-prefixed) of the JSON
//! credential map. The password-derived key lives only in memory, wrapped
//! in [`zeroize::Zeroizing`], and every mutation rewrites the whole file
//! through an atomic temp-file rename.

pub mod codec;
pub mod prompt;
pub mod store;

pub use prompt::{get_vault_password, get_vault_password_with_confirm};
pub use store::{Vault, VAULT_MARKER};
