//! # Vibez Storefront Entry Point
//!
//! ## Usage
//! ```text
//! vibez-storefront [CONFIG.toml] < requests.jsonl > responses.jsonl
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match vibez_storefront::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vibez-storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
