//! # Vibez Storefront Library
//!
//! Application shell for the Vibez marketplace: loads configuration and the
//! catalog, opens a shopping session and serves named commands.
//!
//! ## Module Organization
//! ```text
//! vibez_storefront/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── Storefront bundle
//! │   ├── session.rs  ◄─── Cart, criteria, banner carousel
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request routing
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── catalog.rs  ◄─── Shop page
//! │   ├── vendor.rs   ◄─── Vendor dashboard
//! │   ├── admin.rs    ◄─── Moderation
//! │   ├── banner.rs   ◄─── Banners
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wire Format
//! One JSON request per line on stdin, one JSON response per line on
//! stdout. Logs go to stderr.
//! ```text
//! → {"id": 1, "command": "browse_catalog"}
//! ← {"id": 1, "ok": true, "data": {"resultCount": 7, "products": [...]}}
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use vibez_catalog::CatalogError;

use commands::Response;
use error::ApiError;
use state::{ConfigError, ConfigState, Storefront};

/// Reasons the storefront cannot start or keep serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,vibez=debug; override with RUST_LOG                 │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Path from the first argument, else the platform config dir       │
/// │     • VIBEZ_* environment overrides                                     │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • catalogPath JSON file, or the built-in seed data                  │
/// │                                                                         │
/// │  4. Open Session & Serve ─────────────────────────────────────────────► │
/// │     • One request line in, one response line out, until EOF            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting Vibez Storefront");

    // An explicit config file must load; the default location may be absent
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ConfigState::load(Some(path))?,
        None => ConfigState::load_or_default(None),
    };

    let mut state = Storefront::open(config)?;
    info!(
        products = state.catalog.products().all().len(),
        vendors = state.catalog.vendors().list().len(),
        "Catalog ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = serve(&mut state, stdin.lock(), stdout.lock())?;

    info!(requests = handled, "Input closed, shutting down");
    Ok(())
}

/// Answers every request line from `input` on `output`. Blank lines are
/// skipped; a line that is not UTF-8 gets a `BAD_REQUEST` answer. Returns
/// the number of requests handled.
pub fn serve<R, W>(state: &mut Storefront, mut input: R, mut output: W) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut handled = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                commands::handle_line(state, line)
            }
            Err(e) => {
                warn!(error = %e, "Request line is not UTF-8");
                Response::failure(
                    None,
                    ApiError::bad_request(format!("Request is not valid UTF-8: {}", e)),
                )
            }
        };
        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;

        handled += 1;
        debug!(ok = response.ok, "Response written");
    }

    Ok(handled)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vibez_catalog=trace` - Show trace for one crate only
/// - Default: INFO, DEBUG for the `vibez_*` crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vibez=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Cursor;
    use vibez_catalog::Catalog;

    #[test]
    fn test_serve_survives_invalid_utf8() {
        let mut state = Storefront::with_catalog(ConfigState::default(), Catalog::seeded());
        let mut input: Vec<u8> = b"{\"id\": 1, \"command\": \"get_cart\"}\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"{\"id\": 3, \"command\": \"get_config\"}");

        let mut output = Vec::new();
        let handled = serve(&mut state, Cursor::new(input), &mut output).unwrap();
        assert_eq!(handled, 3);

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines[0]["ok"], true);
        assert_eq!(lines[1]["ok"], false);
        assert_eq!(lines[1]["error"]["code"], "BAD_REQUEST");
        assert_eq!(lines[2]["id"], 3);
        assert_eq!(lines[2]["ok"], true);
    }

    #[test]
    fn test_serve_answers_each_line() {
        let mut state = Storefront::with_catalog(ConfigState::default(), Catalog::seeded());
        let input = concat!(
            r#"{"id": 1, "command": "add_to_cart", "args": {"productId": 3, "size": "9"}}"#,
            "\n\n",
            r#"{"id": 2, "command": "get_cart"}"#,
            "\n",
            "{broken\n",
        );

        let mut output = Vec::new();
        let handled = serve(&mut state, Cursor::new(input), &mut output).unwrap();
        assert_eq!(handled, 3);

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[0]["ok"], true);
        assert_eq!(lines[1]["data"]["totals"]["count"], 1);
        assert_eq!(lines[2]["ok"], false);
        assert_eq!(lines[2]["error"]["code"], "BAD_REQUEST");
    }
}
