//! # Shell Commands
//!
//! One function per menu action. Commands take the [`Store`] they act on plus
//! whatever the cashier typed, log what they do, and return data; printing is
//! the shell's job.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── List, find, filter by category
//! ├── cart.rs     ◄─── Add, view, remove, clear
//! ├── receipt.rs  ◄─── Issue and render the ticket
//! └── report.rs   ◄─── Top priced, most quantity, cart summary
//! ```
//!
//! [`Store`]: delicia_core::Store

pub mod cart;
pub mod catalog;
pub mod receipt;
pub mod report;
