use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Car {
    #[serde(rename = "_id")]
    pub id: String,
    pub brand: String,
    #[serde(rename = "gasType")]
    pub gas_type: i32,
    pub name: String,
    pub price: f64,
}

/// Body accepted by create and update. Any `_id` sent by the client is
/// ignored; the path decides which car is touched.
#[derive(Deserialize)]
pub struct CarInput {
    pub brand: String,
    #[serde(rename = "gasType")]
    pub gas_type: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Brand {
    pub codigo: String,
    pub nome: String,
}

/// Cars in insertion order.
pub type Db = Arc<RwLock<Vec<Car>>>;

pub const BRANDS_PATH: &str = "/carros/marcas";

const CATALOG: &[(&str, &str)] = &[
    ("59", "VW - VolksWagen"),
    ("21", "Fiat"),
    ("22", "Ford"),
    ("23", "GM - Chevrolet"),
    ("7", "BMW"),
    ("6", "Audi"),
    ("56", "Toyota"),
    ("25", "Honda"),
];

pub fn cars_app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/{id}", put(update_car).delete(delete_car))
        .with_state(db)
}

pub fn brands_app() -> Router {
    Router::new().route(BRANDS_PATH, get(list_brands))
}

pub async fn run_cars(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, cars_app()).await
}

pub async fn run_brands(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, brands_app()).await
}

async fn list_cars(State(db): State<Db>) -> Json<Vec<Car>> {
    Json(db.read().await.clone())
}

async fn create_car(State(db): State<Db>, Json(input): Json<CarInput>) -> Json<Car> {
    let car = Car {
        id: Uuid::new_v4().to_string(),
        brand: input.brand,
        gas_type: input.gas_type,
        name: input.name,
        price: input.price,
    };
    db.write().await.push(car.clone());
    tracing::debug!(id = %car.id, "created car");
    Json(car)
}

async fn update_car(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CarInput>,
) -> Result<Json<Car>, StatusCode> {
    let mut cars = db.write().await;
    let car = cars.iter_mut().find(|c| c.id == id).ok_or(StatusCode::NOT_FOUND)?;
    car.brand = input.brand;
    car.gas_type = input.gas_type;
    car.name = input.name;
    car.price = input.price;
    Ok(Json(car.clone()))
}

async fn delete_car(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Car>, StatusCode> {
    let mut cars = db.write().await;
    let pos = cars.iter().position(|c| c.id == id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(cars.remove(pos)))
}

async fn list_brands() -> Json<Vec<Brand>> {
    Json(
        CATALOG
            .iter()
            .map(|(codigo, nome)| Brand {
                codigo: codigo.to_string(),
                nome: nome.to_string(),
            })
            .collect(),
    )
}
