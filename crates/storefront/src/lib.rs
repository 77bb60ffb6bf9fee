//! Example Store storefront library.
//!
//! Holds the client-side pieces of the store (the persistent cart, the
//! catalog client and the application state container) together with the
//! catalog API server that the `example-store-storefront` binary runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
