//! Example Store Core - Shared types library.
//!
//! This crate provides the catalog types used across all Example Store components:
//! - `storefront` - Cart store, catalog client, state container, and catalog API server
//! - `cli` - Terminal front end for browsing the catalog and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
