//! Fixed transport policy and endpoint configuration.

use std::time::Duration;

pub const DEFAULT_CARS_URL: &str = "https://carangas.herokuapp.com/cars";
pub const DEFAULT_BRANDS_URL: &str = "https://parallelum.com.br/fipe/api/v1/carros/marcas";

/// Policy applied to every exchange on a `Transport`.
///
/// `allow_cellular` is not something a socket-level client can enforce; it is
/// exposed so the host can apply it to its platform network policy.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub max_connections_per_host: usize,
    pub allow_cellular: bool,
    pub content_type: &'static str,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_connections_per_host: 5,
            allow_cellular: false,
            content_type: "application/json",
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where the two remote services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub cars_url: String,
    pub brands_url: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            cars_url: DEFAULT_CARS_URL.to_string(),
            brands_url: DEFAULT_BRANDS_URL.to_string(),
        }
    }
}

impl RestConfig {
    pub fn with_cars_url(mut self, url: impl Into<String>) -> Self {
        self.cars_url = url.into();
        self
    }

    pub fn with_brands_url(mut self, url: impl Into<String>) -> Self {
        self.brands_url = url.into();
        self
    }
}
