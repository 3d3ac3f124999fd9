//! Error types for the cars and brand catalog services.
//!
//! # Design
//! `RestError` is the closed taxonomy reported by the rich read path
//! (listing cars). Mutations and brand lookups collapse it to a boolean or an
//! absent value, so it is never wrapped in anything broader. `RequestError`
//! covers local preconditions found while building a mutating request; those
//! never reach the network.

/// Every way a remote exchange can fail.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The request URL could not be constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The network call itself failed (connectivity, DNS, TLS, timeout).
    #[error("transport failure: {0}")]
    TransportFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Something came back but it could not be read as an HTTP response.
    #[error("no interpretable HTTP response: {0}")]
    NoResponse(String),

    /// The response carried no body where one was expected.
    #[error("response carried no data")]
    NoData,

    /// The status code was not 200.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// The body did not decode into the expected record shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

/// Local failures while building a create/modify/remove request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Modify and remove address `{base}/{id}` and the car has no id.
    #[error("car has no identifier; cannot build its URL")]
    MissingId,

    #[error("failed to encode car: {0}")]
    Encode(#[from] serde_json::Error),
}
