// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text vs JSON result rendering.

use duokey_core::DuokeyError;

pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print a result: the preformatted text, or the JSON value with
    /// `--json`.
    pub fn emit(&self, text: &str, json: serde_json::Value) {
        if self.json {
            println!("{json}");
        } else {
            println!("{text}");
        }
    }

    pub fn error(&self, err: &DuokeyError) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({"status": "error", "message": err.to_string()})
            );
        } else {
            eprintln!("Error: {err}");
        }
    }
}
