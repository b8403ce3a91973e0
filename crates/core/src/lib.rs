//! GadgetGrid Core - Shared types library.
//!
//! This crate provides common types used across all GadgetGrid components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal administration panel
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, statuses, and the
//!   shipping-address snapshot
//! - [`money`] - Decimal price arithmetic (effective price, order totals)
//! - [`visibility`] - Banner visibility-window predicate
//! - [`slug`] - URL slug generation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod money;
pub mod slug;
pub mod types;
pub mod visibility;

pub use types::*;
