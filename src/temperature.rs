use itertools::Itertools;
use nalgebra::DMatrix;
use serde_json::{Number, Value};
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::error::{Error, Result};

/// Temperatures in kelvin as a flat row-major buffer together with its shape.
///
/// This is the single internal form every accepted input is normalized into.
/// An empty shape denotes a scalar (holding exactly one value).
/// `integral` records that every value was given as an integer, which only
/// changes how the temperatures are echoed.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureArray {
    shape: Vec<usize>,
    values: Vec<f64>,
    integral: bool,
}

impl TemperatureArray {
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(Error::ShapeMismatch {
                shape,
                len: values.len(),
            });
        }
        Ok(TemperatureArray {
            shape,
            values,
            integral: false,
        })
    }

    pub fn scalar(value: f64) -> Self {
        TemperatureArray {
            shape: Vec::new(),
            values: vec![value],
            integral: false,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn is_integral(&self) -> bool {
        self.integral
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<usize>, Vec<f64>, bool) {
        (self.shape, self.values, self.integral)
    }
}

/// Every form of temperature input accepted by the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub enum Temperatures {
    Scalar(f64),
    Integer(i64),
    Sequence(Vec<f64>),
    IntegerSequence(Vec<i64>),
    /// Native two dimensional array, rows are kept in order.
    Matrix(DMatrix<f64>),
    /// Already normalized input of arbitrary dimension.
    Array(TemperatureArray),
}

impl Temperatures {
    pub fn normalize(self) -> TemperatureArray {
        match self {
            Temperatures::Scalar(t) => TemperatureArray::scalar(t),
            Temperatures::Integer(t) => TemperatureArray {
                shape: Vec::new(),
                values: vec![t as f64],
                integral: true,
            },
            Temperatures::Sequence(values) => TemperatureArray {
                shape: vec![values.len()],
                values,
                integral: false,
            },
            Temperatures::IntegerSequence(values) => TemperatureArray {
                shape: vec![values.len()],
                values: values.into_iter().map(|t| t as f64).collect(),
                integral: true,
            },
            Temperatures::Matrix(matrix) => TemperatureArray {
                shape: vec![matrix.nrows(), matrix.ncols()],
                // nalgebra stores columns contiguously
                values: matrix.transpose().iter().copied().collect(),
                integral: false,
            },
            Temperatures::Array(array) => array,
        }
    }
}

impl From<f64> for Temperatures {
    fn from(value: f64) -> Self {
        Temperatures::Scalar(value)
    }
}

impl From<f32> for Temperatures {
    fn from(value: f32) -> Self {
        Temperatures::Scalar(value.into())
    }
}

impl From<i32> for Temperatures {
    fn from(value: i32) -> Self {
        Temperatures::Integer(value.into())
    }
}

impl From<u32> for Temperatures {
    fn from(value: u32) -> Self {
        Temperatures::Integer(value.into())
    }
}

impl From<i64> for Temperatures {
    fn from(value: i64) -> Self {
        Temperatures::Integer(value)
    }
}

impl From<ThermodynamicTemperature> for Temperatures {
    fn from(value: ThermodynamicTemperature) -> Self {
        Temperatures::Scalar(value.get::<kelvin>())
    }
}

impl From<Vec<f64>> for Temperatures {
    fn from(values: Vec<f64>) -> Self {
        Temperatures::Sequence(values)
    }
}

impl From<&[f64]> for Temperatures {
    fn from(values: &[f64]) -> Self {
        Temperatures::Sequence(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Temperatures {
    fn from(values: [f64; N]) -> Self {
        Temperatures::Sequence(values.to_vec())
    }
}

impl From<Vec<i64>> for Temperatures {
    fn from(values: Vec<i64>) -> Self {
        Temperatures::IntegerSequence(values)
    }
}

impl From<Vec<ThermodynamicTemperature>> for Temperatures {
    fn from(values: Vec<ThermodynamicTemperature>) -> Self {
        Temperatures::Sequence(values.iter().map(|t| t.get::<kelvin>()).collect())
    }
}

impl From<DMatrix<f64>> for Temperatures {
    fn from(matrix: DMatrix<f64>) -> Self {
        Temperatures::Matrix(matrix)
    }
}

impl From<TemperatureArray> for Temperatures {
    fn from(array: TemperatureArray) -> Self {
        Temperatures::Array(array)
    }
}

/// Dynamically typed input, e.g. coming from a loaded document.
/// Only numbers and rectangular (arbitrarily nested) arrays of numbers are accepted.
/// Input made only of integers stays marked as integral.
impl TryFrom<Value> for Temperatures {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        if !matches!(value, Value::Number(_) | Value::Array(_)) {
            return Err(invalid_type(&value));
        }

        let mut values = Vec::new();
        let mut integral = true;
        let shape = flatten_into(&value, &mut values, &mut integral)?;
        if integral {
            return Ok(Temperatures::Array(TemperatureArray {
                shape,
                values,
                integral,
            }));
        }

        match shape.len() {
            0 => Ok(Temperatures::Scalar(values[0])),
            1 => Ok(Temperatures::Sequence(values)),
            _ => Ok(Temperatures::Array(TemperatureArray {
                shape,
                values,
                integral,
            })),
        }
    }
}

/// Push all numbers of `value` in row-major order, return the shape of `value`.
/// Clears `integral` when a number is not an integer.
fn flatten_into(value: &Value, values: &mut Vec<f64>, integral: &mut bool) -> Result<Vec<usize>> {
    match value {
        Value::Number(n) => {
            values.push(number_to_f64(n)?);
            *integral &= n.is_i64() || n.is_u64();
            Ok(Vec::new())
        }
        Value::Array(items) => {
            let item_shapes = items
                .iter()
                .map(|item| flatten_into(item, values, integral))
                .collect::<Result<Vec<_>>>()?;
            if !item_shapes.iter().all_equal() {
                return Err(Error::InvalidInputType {
                    found: "ragged array".into(),
                });
            }
            let mut shape = vec![items.len()];
            shape.extend(item_shapes.into_iter().next().unwrap_or_default());
            Ok(shape)
        }
        other => Err(invalid_type(other)),
    }
}

fn number_to_f64(n: &Number) -> Result<f64> {
    n.as_f64().ok_or_else(|| Error::InvalidInputType {
        found: format!("unrepresentable number {}", n),
    })
}

fn invalid_type(value: &Value) -> Error {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    Error::InvalidInputType {
        found: found.into(),
    }
}
