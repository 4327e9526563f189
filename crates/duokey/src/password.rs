// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault password sourcing for the CLI.
//!
//! Priority: `--password-file`, then `--password`, then a piped stdin
//! line, then `DUOKEY_PASSWORD` / interactive prompt (handled by
//! `duokey_vault::prompt`).

use std::io::{BufRead, IsTerminal};
use std::path::Path;

use duokey_core::DuokeyError;
use duokey_vault::prompt::{
    get_vault_password, get_vault_password_with_confirm, PASSWORD_ENV_VAR,
};
use secrecy::SecretString;

pub fn resolve(
    password_file: Option<&Path>,
    password_flag: Option<&str>,
    confirm: bool,
) -> Result<SecretString, DuokeyError> {
    if let Some(path) = password_file {
        return read_password_file(path);
    }

    if let Some(password) = password_flag {
        return Ok(SecretString::from(password.to_string()));
    }

    // A piped stdin line wins over the interactive prompt, but not over an
    // explicitly set environment variable.
    if std::env::var(PASSWORD_ENV_VAR).is_err() && !std::io::stdin().is_terminal() {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        let password = line.trim().to_string();
        if !password.is_empty() {
            return Ok(SecretString::from(password));
        }
    }

    if confirm {
        get_vault_password_with_confirm()
    } else {
        get_vault_password()
    }
}

fn read_password_file(path: &Path) -> Result<SecretString, DuokeyError> {
    let contents = std::fs::read_to_string(path)?;
    let password = contents.lines().next().unwrap_or("").trim().to_string();
    if password.is_empty() {
        return Err(DuokeyError::Vault(format!(
            "password file {} is empty",
            path.display()
        )));
    }
    Ok(SecretString::from(password))
}
