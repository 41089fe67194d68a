//! `tab-bridge` - serves tab operations as line-delimited JSON on stdio.
//!
//! ```text
//! tab-bridge [--browser <name>] [--osascript <path>] [--no-verify] [--debug]
//! ```
//!
//! `TAB_BRIDGE_BROWSER` selects the browser when `--browser` is absent.

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use tab_bridge::{BrowserApp, Driver, Error, Result, StdioServer};
use tracing::error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

/// Environment fallback for `--browser`.
const BROWSER_ENV: &str = "TAB_BRIDGE_BROWSER";

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
struct Args {
    browser: Option<String>,
    osascript: Option<PathBuf>,
    no_verify: bool,
    debug: bool,
}

impl Args {
    /// Parse command-line arguments.
    fn parse() -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = std::env::args().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--browser" => parsed.browser = Some(value_for(&mut args, "--browser")?),
                "--osascript" => {
                    parsed.osascript = Some(PathBuf::from(value_for(&mut args, "--osascript")?));
                }
                "--no-verify" => parsed.no_verify = true,
                "--debug" => parsed.debug = true,
                other => return Err(Error::config(format!("unknown argument: {other}"))),
            }
        }

        if parsed.browser.is_none() {
            parsed.browser = std::env::var(BROWSER_ENV).ok().filter(|v| !v.is_empty());
        }
        Ok(parsed)
    }
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::config(format!("{flag} needs a value")))
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging on stderr; stdout carries the protocol.
///
/// `RUST_LOG` wins over the `--debug` default.
fn init_logging(debug: bool) {
    let filter = if debug {
        "tab_bridge=debug"
    } else {
        "tab_bridge=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_driver(args: &Args) -> Result<Driver> {
    let mut builder = Driver::builder().verify_activation(!args.no_verify);
    if let Some(name) = &args.browser {
        builder = builder.browser(name.parse::<BrowserApp>()?);
    }
    if let Some(program) = &args.osascript {
        builder = builder.osascript(program);
    }
    builder.build()
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("tab-bridge: {e}");
            return ExitCode::from(2);
        }
    };

    init_logging(args.debug);

    let driver = match build_driver(&args) {
        Ok(driver) => driver,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    match StdioServer::new(driver).serve().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Transport failed");
            ExitCode::FAILURE
        }
    }
}
