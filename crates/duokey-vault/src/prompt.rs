// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or the DUOKEY_PASSWORD environment
//! variable.

use duokey_core::DuokeyError;
use secrecy::SecretString;

/// The environment variable name for providing the vault password.
pub const PASSWORD_ENV_VAR: &str = "DUOKEY_PASSWORD";

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Get the vault password from the environment or an interactive prompt.
///
/// Priority:
/// 1. `DUOKEY_PASSWORD` environment variable (for scripts/CI)
/// 2. Interactive TTY prompt via `rpassword`
///
/// Returns an error if neither source is available.
pub fn get_vault_password() -> Result<SecretString, DuokeyError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("Vault password: ");
        let password = rpassword::read_password()
            .map_err(|e| DuokeyError::Vault(format!("failed to read password: {e}")))?;
        check_length(&password)?;
        return Ok(SecretString::from(password));
    }

    Err(DuokeyError::Vault(
        "no password provided; set DUOKEY_PASSWORD or run interactively".to_string(),
    ))
}

/// Get the vault password with a confirmation prompt (for vault creation
/// and password change). The env var does not need confirmation.
pub fn get_vault_password_with_confirm() -> Result<SecretString, DuokeyError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("New vault password: ");
        let first = rpassword::read_password()
            .map_err(|e| DuokeyError::Vault(format!("failed to read password: {e}")))?;
        eprint!("Confirm vault password: ");
        let second = rpassword::read_password()
            .map_err(|e| DuokeyError::Vault(format!("failed to read password: {e}")))?;

        if first != second {
            return Err(DuokeyError::Vault("passwords do not match".to_string()));
        }
        check_length(&first)?;
        return Ok(SecretString::from(first));
    }

    Err(DuokeyError::Vault(
        "no password provided; set DUOKEY_PASSWORD or run interactively".to_string(),
    ))
}

fn check_length(password: &str) -> Result<(), DuokeyError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DuokeyError::Vault(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn password_comes_from_env_var() {
        // SAFETY: test-only env mutation. Tests using env vars must not run
        // in parallel with each other.
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "from-environment") };
        let result = get_vault_password();
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "from-environment");
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_length("1234567").is_err());
        assert!(check_length("12345678").is_ok());
    }
}
