//! # Delicia POS
//!
//! Console entry point. Everything interesting lives in the library so it
//! can be tested; see [`delicia_cli::run`].

fn main() -> anyhow::Result<()> {
    delicia_cli::run()
}
