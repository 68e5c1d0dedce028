//! Fieldhouse Core - Shared types library.
//!
//! This crate provides common types used across all Fieldhouse components:
//! - `storefront` - The headless storefront engine (catalog, cart, checkout)
//! - `cli` - Command-line driver for browsing, seeding, and demo orders
//!
//! # Architecture
//!
//! The core crate contains only types and pure policy - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, pricing policy, and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
