//! Asynchronous access layer for the Carangas cars backend and brand catalog.
//!
//! # Overview
//! `Rest` executes the requests built by `carangas-core` over one shared,
//! immutable `Transport` and resolves every operation exactly once: with the
//! `RestError` taxonomy for listing cars, with an absent value for brand
//! lookup, and with a `bool` for save, update and delete.
//!
//! # Design
//! - `Transport::shared()` is built lazily once and never mutated afterwards.
//! - `Exchange` is the seam between the access layer and the network.
//! - No retries, caching or cancellation: a failure ends that one operation.

pub mod access;
pub mod config;
pub mod transport;

pub use access::Rest;
pub use config::{RestConfig, TransportConfig, DEFAULT_BRANDS_URL, DEFAULT_CARS_URL};
pub use transport::{Exchange, Transport};
