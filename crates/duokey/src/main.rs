// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duokey - a password-protected Duo push/HOTP authenticator.
//!
//! Binary entry point: argument parsing, vault unlock, and command
//! dispatch. QR payloads are accepted pre-decoded as `--code`/`--host`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use duokey_core::DuokeyError;
use duokey_vault::store::DEFAULT_MAX_ATTEMPTS;
use duokey_vault::Vault;
use tracing_subscriber::EnvFilter;

mod auth;
mod keys;
mod output;
mod password;

use output::Output;

/// Duokey - Duo push/HOTP authenticator with an encrypted vault.
#[derive(Parser, Debug)]
#[command(name = "duokey", version, about, long_about = None)]
struct Cli {
    /// Path to the vault file.
    #[arg(long, global = true, default_value = "duokey.vault")]
    vault: PathBuf,

    /// Emit machine-readable JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    /// Read the vault password from the first line of a file.
    #[arg(long, global = true, value_name = "FILE")]
    password_file: Option<PathBuf>,

    /// Vault password on the command line (visible to other processes;
    /// prefer --password-file or DUOKEY_PASSWORD).
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Activate a new device and store it under a nickname.
    Add {
        /// Nickname for the new key.
        name: String,
        /// Activation code from the enrollment QR payload.
        #[arg(long)]
        code: String,
        /// API host from the enrollment QR payload.
        #[arg(long)]
        host: String,
    },
    /// Delete a stored key.
    Delete { name: String },
    /// List stored keys.
    List,
    /// Poll for and approve a pending push request.
    Push {
        name: String,
        /// Give up after this many empty polls.
        #[arg(long, default_value_t = 10)]
        max_attempts: u32,
        /// Seconds to wait between polls.
        #[arg(long, default_value_t = 10)]
        poll_interval: u64,
    },
    /// Generate the next HOTP code (or replay the current one).
    Hotp {
        name: String,
        /// Show the code at the current counter without advancing it.
        #[arg(long)]
        view: bool,
    },
    /// Show recently generated HOTP codes.
    History {
        name: String,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Change the vault password.
    Passwd,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let out = Output { json: cli.json };
    if let Err(e) = run(cli, &out).await {
        out.error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, out: &Output) -> Result<(), DuokeyError> {
    let mut vault = open_vault(&cli)?;

    match cli.command {
        Commands::Add { name, code, host } => {
            keys::add(&mut vault, out, &name, &code, &host).await
        }
        Commands::Delete { name } => keys::delete(&mut vault, out, &name),
        Commands::List => keys::list(&vault, out),
        Commands::Push {
            name,
            max_attempts,
            poll_interval,
        } => auth::push(&vault, out, &name, max_attempts, poll_interval).await,
        Commands::Hotp { name, view } => auth::hotp(&mut vault, out, &name, view),
        Commands::History { name, count } => auth::history(&vault, out, &name, count),
        Commands::Passwd => keys::passwd(&mut vault, out, cli.password_file.as_deref()),
    }
}

/// Unlock (or create) the vault, re-prompting on a wrong password up to
/// the attempt limit. A password from `--password-file` or `--password`
/// cannot change between attempts, so those sources get a single try.
/// Creating a fresh vault asks for confirmation when the password comes
/// from an interactive prompt.
fn open_vault(cli: &Cli) -> Result<Vault, DuokeyError> {
    let creating = !cli.vault.exists();
    let max_attempts = if cli.password_file.is_some() || cli.password.is_some() {
        1
    } else {
        DEFAULT_MAX_ATTEMPTS
    };
    let password_file = cli.password_file.clone();
    let password_flag = cli.password.clone();
    Vault::open_with_retries(&cli.vault, max_attempts, move |_| {
        password::resolve(password_file.as_deref(), password_flag.as_deref(), creating)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn fixed_password_source_gets_a_single_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let vault_path = dir.path().join("cli.duokey");
        Vault::open(
            &vault_path,
            &SecretString::from("right password".to_string()),
        )
        .unwrap();

        let file = dir.path().join("password.txt");
        std::fs::write(&file, "wrong password\n").unwrap();

        let cli = Cli::parse_from([
            "duokey",
            "--vault",
            vault_path.to_str().unwrap(),
            "--password-file",
            file.to_str().unwrap(),
            "list",
        ]);
        let result = open_vault(&cli);
        assert!(matches!(
            result,
            Err(DuokeyError::MaxAttemptsExceeded { attempts: 1 })
        ));
    }

    #[test]
    fn password_flag_also_gets_a_single_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let vault_path = dir.path().join("flag.duokey");
        Vault::open(
            &vault_path,
            &SecretString::from("right password".to_string()),
        )
        .unwrap();

        let cli = Cli::parse_from([
            "duokey",
            "--vault",
            vault_path.to_str().unwrap(),
            "--password",
            "wrong password",
            "list",
        ]);
        let result = open_vault(&cli);
        assert!(matches!(
            result,
            Err(DuokeyError::MaxAttemptsExceeded { attempts: 1 })
        ));
    }
}
