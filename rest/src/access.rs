//! The single access point for the cars backend and the brand catalog.
//!
//! # Design
//! `Rest` pairs the stateless `CarangasClient` with an `Exchange`. Each
//! operation schedules exactly one exchange. Listing cars reports the full
//! `RestError` taxonomy; brand lookup resolves to `None` on any failure; the
//! three mutations go through `dispatch` and resolve to a go/no-go `bool`.
//!
//! The `*_then` variants take `FnOnce` continuations, spawn onto the runtime
//! `Rest` was bound to at construction and return at once, from any thread.
//! Continuations run on a runtime worker thread; callers that touch UI state
//! must hop back to their own thread.

use std::sync::{Arc, OnceLock};

use carangas_core::{Brand, Car, CarangasClient, Operation, RestError};
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

use crate::config::RestConfig;
use crate::transport::{Exchange, Transport};

static BACKGROUND: OnceLock<Runtime> = OnceLock::new();

/// The runtime continuations are spawned on: the caller's, if there is one,
/// otherwise a process-wide background runtime built on first use.
fn runtime_handle() -> Result<Handle, RestError> {
    if let Ok(handle) = Handle::try_current() {
        return Ok(handle);
    }
    if let Some(runtime) = BACKGROUND.get() {
        return Ok(runtime.handle().clone());
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("carangas-rest")
        .enable_all()
        .build()
        .map_err(|e| RestError::TransportFailure(Box::new(e)))?;
    Ok(BACKGROUND.get_or_init(|| runtime).handle().clone())
}

#[derive(Clone)]
pub struct Rest {
    client: Arc<CarangasClient>,
    exchange: Arc<dyn Exchange>,
    handle: Handle,
}

impl Rest {
    /// Access layer over the process-wide shared transport.
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let transport: Arc<dyn Exchange> = Transport::shared()?;
        Self::with_exchange(config, transport)
    }

    pub fn with_exchange(config: RestConfig, exchange: Arc<dyn Exchange>) -> Result<Self, RestError> {
        Ok(Self {
            client: Arc::new(CarangasClient::new(&config.cars_url, &config.brands_url)),
            exchange,
            handle: runtime_handle()?,
        })
    }

    /// Spawn continuations on `handle` instead.
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = handle;
        self
    }

    pub fn client(&self) -> &CarangasClient {
        &self.client
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>, RestError> {
        let request = self.client.build_list_cars();
        tracing::debug!(url = %request.url, "listing cars");

        let result = match self.exchange.execute(request).await {
            Ok(response) => self.client.parse_list_cars(response),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "list cars failed");
        }
        result
    }

    /// Best-effort: any failure reads as `None`.
    pub async fn list_brands(&self) -> Option<Vec<Brand>> {
        let request = self.client.build_list_brands();
        tracing::debug!(url = %request.url, "listing brands");

        let response = match self.exchange.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "brand catalog unavailable");
                return None;
            }
        };
        let status = response.status;
        let brands = self.client.parse_list_brands(response);
        if brands.is_none() {
            tracing::warn!(status, "brand catalog response unusable");
        }
        brands
    }

    pub async fn save(&self, car: &Car) -> bool {
        self.dispatch(Operation::Create, car).await.is_some()
    }

    /// Save and decode the backend's echo, which carries the assigned id
    /// needed for later updates and deletes.
    pub async fn save_returning(&self, car: &Car) -> Option<Car> {
        let body = self.dispatch(Operation::Create, car).await?;
        let saved = self.client.parse_saved_car(&body);
        if saved.is_none() {
            tracing::warn!("saved car echo did not decode");
        }
        saved
    }

    pub async fn update(&self, car: &Car) -> bool {
        self.dispatch(Operation::Modify, car).await.is_some()
    }

    pub async fn delete(&self, car: &Car) -> bool {
        self.dispatch(Operation::Remove, car).await.is_some()
    }

    /// Shared path for the three mutations. Returns the response body on
    /// success.
    async fn dispatch(&self, op: Operation, car: &Car) -> Option<Vec<u8>> {
        let request = match self.client.build_mutation(op, car) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(?op, error = %e, "mutation not sent");
                return None;
            }
        };
        tracing::debug!(?op, method = request.method.as_str(), url = %request.url, "dispatching");

        let response = match self.exchange.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(?op, error = %e, "mutation failed");
                return None;
            }
        };
        let status = response.status;
        let body = self.client.parse_mutation(response);
        if body.is_none() {
            tracing::warn!(?op, status, "mutation rejected");
        }
        body
    }

    /// Schedule a car listing.
    ///
    /// A 200 response that delivered no body invokes neither continuation.
    pub fn list_cars_then<S, E>(&self, on_success: S, on_error: E) -> JoinHandle<()>
    where
        S: FnOnce(Vec<Car>) + Send + 'static,
        E: FnOnce(RestError) + Send + 'static,
    {
        let rest = self.clone();
        self.handle.spawn(async move {
            match rest.list_cars().await {
                Ok(cars) => on_success(cars),
                Err(RestError::NoData) => {
                    tracing::warn!("list cars returned no body; completion dropped");
                }
                Err(e) => on_error(e),
            }
        })
    }

    pub fn list_brands_then<F>(&self, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Option<Vec<Brand>>) + Send + 'static,
    {
        let rest = self.clone();
        self.handle.spawn(async move { on_complete(rest.list_brands().await) })
    }

    pub fn save_then<F>(&self, car: Car, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.dispatch_then(Operation::Create, car, on_complete)
    }

    pub fn update_then<F>(&self, car: Car, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.dispatch_then(Operation::Modify, car, on_complete)
    }

    pub fn delete_then<F>(&self, car: Car, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.dispatch_then(Operation::Remove, car, on_complete)
    }

    fn dispatch_then<F>(&self, op: Operation, car: Car, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let rest = self.clone();
        self.handle.spawn(async move {
            let ok = rest.dispatch(op, &car).await.is_some();
            on_complete(ok)
        })
    }
}
