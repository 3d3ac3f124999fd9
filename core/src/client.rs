//! Stateless request builder and response interpreter for both services.
//!
//! # Design
//! `CarangasClient` holds only the two endpoint URLs and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The three mutations share `build_mutation`, parameterized
//! by `Operation`, so method selection, URL shape and success criteria stay
//! identical across save, update and delete.

use crate::error::{RequestError, RestError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Brand, Car};

/// The only status either service reports on success.
pub const SUCCESS_STATUS: u16 = 200;

/// Which mutation a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Modify,
    Remove,
}

impl Operation {
    pub fn method(self) -> HttpMethod {
        match self {
            Operation::Create => HttpMethod::Post,
            Operation::Modify => HttpMethod::Put,
            Operation::Remove => HttpMethod::Delete,
        }
    }
}

/// Synchronous, stateless client for the cars backend and brand catalog.
#[derive(Debug, Clone)]
pub struct CarangasClient {
    cars_url: String,
    brands_url: String,
}

impl CarangasClient {
    pub fn new(cars_url: &str, brands_url: &str) -> Self {
        Self {
            cars_url: cars_url.trim_end_matches('/').to_string(),
            brands_url: brands_url.to_string(),
        }
    }

    pub fn cars_url(&self) -> &str {
        &self.cars_url
    }

    pub fn brands_url(&self) -> &str {
        &self.brands_url
    }

    pub fn build_list_cars(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.cars_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_brands(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.brands_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build the request for a save (`Create`), update (`Modify`) or delete
    /// (`Remove`).
    ///
    /// The identifier is used as given; only its presence is checked.
    pub fn build_mutation(&self, op: Operation, car: &Car) -> Result<HttpRequest, RequestError> {
        let url = match op {
            Operation::Create => self.cars_url.clone(),
            Operation::Modify | Operation::Remove => {
                let id = car.id.as_deref().ok_or(RequestError::MissingId)?;
                format!("{}/{id}", self.cars_url)
            }
        };

        let (headers, body) = match op {
            Operation::Create | Operation::Modify => (
                vec![("content-type".to_string(), "application/json".to_string())],
                Some(serde_json::to_vec(car)?),
            ),
            Operation::Remove => (Vec::new(), None),
        };

        Ok(HttpRequest {
            method: op.method(),
            url,
            headers,
            body,
        })
    }

    /// Interpret a list-cars response: status first, then body presence, then
    /// decoding.
    pub fn parse_list_cars(&self, response: HttpResponse) -> Result<Vec<Car>, RestError> {
        check_status(&response)?;
        let body = response.body.ok_or(RestError::NoData)?;
        serde_json::from_slice(&body).map_err(RestError::MalformedPayload)
    }

    /// Interpret a brand catalog response. Every failure reads as "unavailable".
    pub fn parse_list_brands(&self, response: HttpResponse) -> Option<Vec<Brand>> {
        if response.status != SUCCESS_STATUS {
            return None;
        }
        serde_json::from_slice(response.body.as_deref()?).ok()
    }

    /// The response body of a successful mutation: status exactly 200 and a
    /// non-empty body. Anything else yields `None`.
    pub fn parse_mutation(&self, response: HttpResponse) -> Option<Vec<u8>> {
        if response.status != SUCCESS_STATUS {
            return None;
        }
        response.body.filter(|body| !body.is_empty())
    }

    pub fn mutation_succeeded(&self, response: HttpResponse) -> bool {
        self.parse_mutation(response).is_some()
    }

    /// Decode the backend's echo of a saved car, which carries the assigned
    /// `_id`.
    pub fn parse_saved_car(&self, body: &[u8]) -> Option<Car> {
        serde_json::from_slice(body).ok()
    }
}

fn check_status(response: &HttpResponse) -> Result<(), RestError> {
    if response.status == SUCCESS_STATUS {
        return Ok(());
    }
    Err(RestError::UnexpectedStatus(response.status))
}
