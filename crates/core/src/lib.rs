//! SmartCart Core - Shared types and domain logic.
//!
//! This crate provides the common types used across all SmartCart components:
//! - `storefront` - The storefront service (catalog, cart, page controllers)
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! HTTP clients, no storage access. Cart mutation, totals computation, and
//! catalog filtering all live here so they can be tested in isolation; the
//! storefront crate wires them to persistence and notifications.
//!
//! # Modules
//!
//! - [`types`] - Products, cart data model, pricing, theme, emails, IDs
//! - [`filter`] - Catalog filtering and search

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filter;
pub mod types;

pub use filter::*;
pub use types::*;
