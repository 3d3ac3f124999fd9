//! Record types exchanged with the cars backend and the brand catalog.
//!
//! # Design
//! These are passive records: no behavior beyond serde and the fuel label
//! derived from `gas_type`. Field names on the wire follow the backend
//! (`_id`, `gasType`) and the catalog (`nome`), mapped with serde renames.

use serde::{Deserialize, Serialize};

/// A vehicle listing stored on the cars backend.
///
/// `id` is `None` until the backend has assigned one. It is left out of the
/// encoded JSON when absent so a create request never sends `"_id": null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub brand: String,
    #[serde(rename = "gasType")]
    pub gas_type: i32,
    pub name: String,
    pub price: f64,
}

impl Car {
    /// A car that has not been sent to the backend yet.
    pub fn new(brand: impl Into<String>, name: impl Into<String>, price: f64, gas_type: i32) -> Self {
        Self {
            id: None,
            brand: brand.into(),
            gas_type,
            name: name.into(),
            price,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn fuel_type(&self) -> FuelType {
        FuelType::from_code(self.gas_type)
    }

    pub fn fuel_label(&self) -> &'static str {
        self.fuel_type().label()
    }
}

/// Fuel category selected by `Car::gas_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelType {
    Flex,
    Alcohol,
    Gasoline,
}

impl FuelType {
    /// Codes outside `0..=1` fall back to `Gasoline` instead of failing.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => FuelType::Flex,
            1 => FuelType::Alcohol,
            _ => FuelType::Gasoline,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            FuelType::Flex => 0,
            FuelType::Alcohol => 1,
            FuelType::Gasoline => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FuelType::Flex => "Flex",
            FuelType::Alcohol => "Alcohol",
            FuelType::Gasoline => "Gasoline",
        }
    }
}

/// A manufacturer entry from the brand catalog. Extra catalog fields
/// (such as `codigo`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    #[serde(rename = "nome")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_labels_cover_known_and_unknown_codes() {
        let labels: Vec<&str> = [0, 1, 2, 99]
            .into_iter()
            .map(|code| Car::new("Fiat", "Uno", 0.0, code).fuel_label())
            .collect();
        assert_eq!(labels, vec!["Flex", "Alcohol", "Gasoline", "Gasoline"]);
    }

    #[test]
    fn negative_code_is_gasoline() {
        assert_eq!(FuelType::from_code(-1), FuelType::Gasoline);
    }

    #[test]
    fn unsent_car_omits_id() {
        let car = Car::new("Fiat", "Uno", 15000.0, 0);
        let json = serde_json::to_value(&car).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["brand"], "Fiat");
        assert_eq!(json["gasType"], 0);
        assert_eq!(json["name"], "Uno");
        assert_eq!(json["price"], 15000.0);
        assert!(!car.is_persisted());
    }

    #[test]
    fn car_decodes_null_or_missing_id() {
        let with_null: Car =
            serde_json::from_str(r#"{"_id":null,"brand":"VW","gasType":1,"name":"Gol","price":9000}"#).unwrap();
        assert!(with_null.id.is_none());

        let missing: Car =
            serde_json::from_str(r#"{"brand":"VW","gasType":1,"name":"Gol","price":9000}"#).unwrap();
        assert!(missing.id.is_none());
    }

    #[test]
    fn persisted_car_keeps_id() {
        let car: Car = serde_json::from_str(
            r#"{"_id":"5a1b","brand":"Ford","gasType":2,"name":"Ka","price":31500.5}"#,
        )
        .unwrap();
        assert_eq!(car.id.as_deref(), Some("5a1b"));
        assert!(car.is_persisted());
        assert_eq!(car.fuel_type(), FuelType::Gasoline);
        assert_eq!(car.price, 31500.5);
    }

    #[test]
    fn brand_reads_nome_and_ignores_codigo() {
        let brand: Brand = serde_json::from_str(r#"{"codigo":"21","nome":"Fiat"}"#).unwrap();
        assert_eq!(brand.name, "Fiat");
    }

    #[test]
    fn brand_requires_nome() {
        let result: Result<Brand, _> = serde_json::from_str(r#"{"name":"Fiat"}"#);
        assert!(result.is_err());
    }
}
