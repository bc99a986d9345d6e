//! # Delicia CLI Library
//!
//! The console shell for Delicia POS.
//!
//! ## Module Organization
//! ```text
//! delicia_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Flags, DELICIA_* env vars, defaults
//! ├── shell.rs        ◄─── Menu loop over stdin/stdout
//! ├── commands/
//! │   ├── catalog.rs  ◄─── List, find, filter
//! │   ├── cart.rs     ◄─── Add, view, remove, clear
//! │   ├── receipt.rs  ◄─── Issue and render the ticket
//! │   └── report.rs   ◄─── Reports screen
//! ├── format.rs       ◄─── Padded text tables
//! └── error.rs        ◄─── CLI error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod shell;

use std::io;

use anyhow::Context;
use clap::Parser;
use delicia_core::{Catalog, Store};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, CliArgs, ReceiptFormat};
pub use error::{CliError, CliResult, ErrorCode};
pub use shell::Shell;

/// Runs the interactive session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Flags ──────────────────────────────────────────────────────► │
/// │     • clap derive, see `CliArgs`                                        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults < DELICIA_* env vars < flags                             │
/// │                                                                         │
/// │  3. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  4. Build Store ──────────────────────────────────────────────────────► │
/// │     • seed catalog, empty cart, configured tax rate                     │
/// │                                                                         │
/// │  5. Run Shell ────────────────────────────────────────────────────────► │
/// │     • menu loop until "9" or end of input                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = AppConfig::load(&args).context("Invalid configuration")?;

    init_tracing(&config.log_filter);
    info!(
        store = %config.store_name,
        tax_rate = %config.tax_rate,
        receipt_format = %config.receipt_format,
        "Configuration loaded"
    );

    let store = build_store(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(store, config, stdin.lock(), stdout.lock());
    shell.run()?;

    Ok(())
}

/// Builds the session store from configuration.
pub fn build_store(config: &AppConfig) -> Store {
    let mut store = Store::new(
        config.store_name.clone(),
        Catalog::seed(),
        config.pricing_policy(),
    );
    if let Some(customer) = &config.customer {
        store.set_customer(customer, None);
    }
    store
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=delicia_cli=info` - Session and cart events only
/// - Default: `fallback` (normally WARN)
///
/// Logs go to stderr so they never mix with the menu on stdout.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
