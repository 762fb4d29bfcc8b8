//! Specific heat of the cryogenic vacuum grease Apiezon N between 0.1 K and 2.5 K.

pub mod apiezon;
pub mod error;
pub mod request;
pub mod temperature;
mod tools;

pub use apiezon::{evaluate, evaluate_json, specific_heat, SpecificHeats};
pub use error::{Error, Result};
pub use request::EvaluationRequest;
pub use temperature::{TemperatureArray, Temperatures};
