//! Synchronous core for the Carangas cars backend and brand catalog.
//!
//! # Overview
//! Builds `HttpRequest` values and interprets `HttpResponse` values without
//! touching the network. `carangas-rest` executes the exchanges over the
//! shared transport; tests can execute them with any HTTP client.
//!
//! # Design
//! - `CarangasClient` is stateless: it holds only the two endpoint URLs.
//! - Listing cars reports the full `RestError` taxonomy. Brand lookup and the
//!   three mutations collapse failures to an absent value or `false`.
//! - `form` carries the add/edit screen's coercion rules so the presentation
//!   layer and the tests agree on what gets submitted.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod types;

pub use client::{CarangasClient, Operation, SUCCESS_STATUS};
pub use error::{RequestError, RestError};
pub use form::{parse_price, sort_brands, CarForm, FormAction, FormError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Brand, Car, FuelType};
