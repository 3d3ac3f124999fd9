//! Coercion from the add/edit form's text fields into a `Car`.
//!
//! The presentation layer owns the form; these helpers hold the rules it
//! applies before handing a record to the access layer, so they can be
//! checked without a UI.

use crate::types::{Brand, Car};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormError {
    #[error("price {0:?} is not a number")]
    InvalidPrice(String),

    #[error("price must not be negative")]
    NegativePrice,
}

/// Raw text of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarForm {
    pub brand: String,
    pub name: String,
    pub price: String,
    pub gas_type: i32,
}

impl CarForm {
    /// Prefill the form from a car being edited.
    pub fn from_car(car: &Car) -> Self {
        Self {
            brand: car.brand.clone(),
            name: car.name.clone(),
            price: car.price.to_string(),
            gas_type: car.gas_type,
        }
    }

    /// Build the record to submit. Editing keeps the existing id; otherwise a
    /// new unsent car is created.
    pub fn apply(self, existing: Option<Car>) -> Result<Car, FormError> {
        let price = parse_price(&self.price)?;
        let mut car = existing.unwrap_or_else(|| Car::new("", "", 0.0, 0));
        car.brand = self.brand;
        car.name = self.name;
        car.price = price;
        car.gas_type = self.gas_type;
        Ok(car)
    }
}

/// Empty text counts as zero.
pub fn parse_price(text: &str) -> Result<f64, FormError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    let price: f64 = text
        .parse()
        .map_err(|_| FormError::InvalidPrice(text.to_string()))?;
    if !price.is_finite() {
        return Err(FormError::InvalidPrice(text.to_string()));
    }
    if price < 0.0 {
        return Err(FormError::NegativePrice);
    }
    Ok(price)
}

/// What submitting the form should do with the resulting car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Update,
}

impl FormAction {
    pub fn for_car(car: &Car) -> Self {
        if car.is_persisted() {
            FormAction::Update
        } else {
            FormAction::Save
        }
    }
}

/// Order brands for the picker: ascending by name.
pub fn sort_brands(brands: &mut [Brand]) {
    brands.sort_by(|a, b| a.name.cmp(&b.name));
}
