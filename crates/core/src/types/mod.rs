//! Core types for SmartCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod pricing;
pub mod product;
pub mod theme;

pub use cart::{AddOutcome, Cart, CartLineItem, QuantityChange, RemoveOutcome};
pub use email::{Email, EmailError};
pub use id::*;
pub use pricing::Totals;
pub use product::Product;
pub use theme::Theme;
