//! The shared HTTP transport.
//!
//! # Design
//! One `reqwest::Client` carries the fixed policy from `TransportConfig`:
//! JSON content type, request timeout and a pooled connection limit. reqwest
//! only bounds idle connections, so a per-host semaphore caps how many
//! exchanges are in flight against any one host. `Exchange` is the seam the
//! access layer talks to, which lets tests script outcomes without sockets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use carangas_core::{HttpMethod, HttpRequest, HttpResponse, RestError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tokio::sync::Semaphore;

use crate::config::TransportConfig;

static SHARED: OnceLock<Arc<Transport>> = OnceLock::new();

/// Executes one request and reports the outcome in the `RestError` taxonomy.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RestError>;
}

pub struct Transport {
    client: reqwest::Client,
    max_per_host: usize,
    limits: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl Transport {
    pub fn new(config: &TransportConfig) -> Result<Self, RestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(config.content_type));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_connections_per_host)
            .build()
            .map_err(|e| RestError::TransportFailure(Box::new(e)))?;

        tracing::debug!(
            timeout_ms = config.timeout.as_millis() as u64,
            max_per_host = config.max_connections_per_host,
            allow_cellular = config.allow_cellular,
            "transport configured"
        );

        Ok(Self {
            client,
            max_per_host: config.max_connections_per_host.max(1),
            limits: Mutex::new(HashMap::new()),
        })
    }

    /// The process-wide transport, built on first use with the default policy.
    pub fn shared() -> Result<Arc<Transport>, RestError> {
        if let Some(transport) = SHARED.get() {
            return Ok(Arc::clone(transport));
        }
        let transport = Arc::new(Transport::new(&TransportConfig::default())?);
        Ok(Arc::clone(SHARED.get_or_init(|| transport)))
    }

    fn limit_for(&self, host: &str) -> Arc<Semaphore> {
        let mut limits = self.limits.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(
            limits
                .entry(host.to_string())
                .or_insert_with(|| Arc::new(Semaphore::new(self.max_per_host))),
        )
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// A peer that answered with something other than an HTTP response counts as
/// no response; every other send failure is a transport failure.
fn send_failure(error: reqwest::Error) -> RestError {
    if !error.is_timeout() {
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            if let Some(hyper) = cause.downcast_ref::<hyper::Error>() {
                if hyper.is_parse() || hyper.is_parse_status() || hyper.is_incomplete_message() {
                    return RestError::NoResponse(error.to_string());
                }
            }
            source = cause.source();
        }
    }
    RestError::TransportFailure(Box::new(error))
}

#[async_trait]
impl Exchange for Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RestError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| RestError::InvalidUrl(format!("{}: {e}", request.url)))?;
        let host = match (url.host_str(), url.port_or_known_default()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(RestError::InvalidUrl(format!("{}: no host", request.url))),
        };

        let _permit = self
            .limit_for(&host)
            .acquire_owned()
            .await
            .map_err(|e| RestError::TransportFailure(Box::new(e)))?;

        let mut builder = self.client.request(method(request.method), url);
        for (key, value) in request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(send_failure)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RestError::TransportFailure(Box::new(e))
            } else {
                RestError::NoResponse(e.to_string())
            }
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body: Some(body.to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_transport_is_built_once() {
        let first = Transport::shared().unwrap();
        let second = Transport::shared().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn limits_are_per_host() {
        let transport = Transport::new(&TransportConfig::default()).unwrap();
        let a = transport.limit_for("cars.test:443");
        let again = transport.limit_for("cars.test:443");
        let b = transport.limit_for("catalog.test:443");
        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.available_permits(), 5);
    }

    #[tokio::test]
    async fn unparsable_url_is_invalid() {
        let transport = Transport::new(&TransportConfig::default()).unwrap();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "not a url".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, RestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn hostless_url_is_invalid() {
        let transport = Transport::new(&TransportConfig::default()).unwrap();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "data:text/plain,cars".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(request).await.unwrap_err();
        assert!(matches!(err, RestError::InvalidUrl(_)));
    }
}
