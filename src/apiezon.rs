//! Specific heat of Apiezon N vacuum grease at very low temperatures.
//!
//! Uses the empirical fit `C = 1.32 T + 25.8 T^3 + 0.0044 T^-2` [uJ/(g.K)],
//! from Pobell, F. "Matter and Methods at Low Temperatures", 3rd edition,
//! Springer-Verlag, 2007.

use std::fmt;

use nalgebra::DMatrix;
use serde_json::Value;
use uom::si::{f64::SpecificHeatCapacity, specific_heat_capacity::joule_per_kilogram_kelvin};

use crate::temperature::{TemperatureArray, Temperatures};
use crate::tools::power_series;

/// Lowest temperature covered by the fit [K]
pub const MIN_TEMPERATURE: f64 = 0.1;
/// Highest temperature covered by the fit [K]
pub const MAX_TEMPERATURE: f64 = 2.5;

// 1 uJ/(g.K) = 1e-3 J/(kg.K)
const JOULE_PER_KILOGRAM_KELVIN_PER_UNIT: f64 = 1e-3;

/// Specific heat [uJ/(g.K)] at a single temperature [K].
/// Returns NaN outside of the fitted range (including NaN input), the fit is not
/// validated there.
pub fn specific_heat(t: f64) -> f64 {
    if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) {
        power_series!(t; 1.32 => 1, 25.8 => 3, 0.0044 => -2)
    } else {
        f64::NAN
    }
}

/// Evaluate the specific heat for every temperature, keeping the input's shape.
/// When `echo` is set, one sentence per value is printed to stdout.
pub fn evaluate<T: Into<Temperatures>>(temperatures: T, echo: bool) -> SpecificHeats {
    let heats = SpecificHeats::from(temperatures.into().normalize());
    if echo {
        print!("{}", heats.echo());
    }
    heats
}

/// Like [`evaluate`], but for dynamically typed input.
/// Fails with [`crate::Error::InvalidInputType`] when `value` is not a number or a
/// rectangular array of numbers.
pub fn evaluate_json(value: Value, echo: bool) -> crate::Result<SpecificHeats> {
    let temperatures = Temperatures::try_from(value)?;
    Ok(evaluate(temperatures, echo))
}

/// Specific heats [uJ/(g.K)] along with the temperatures they were evaluated at.
/// Row-major, an empty shape means the input was a scalar.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecificHeats {
    shape: Vec<usize>,
    temperatures: Vec<f64>,
    values: Vec<f64>,
    integral: bool,
}

impl From<TemperatureArray> for SpecificHeats {
    fn from(array: TemperatureArray) -> Self {
        let (shape, temperatures, integral) = array.into_parts();
        let values: Vec<f64> = temperatures.iter().map(|&t| specific_heat(t)).collect();

        for (t, _) in temperatures
            .iter()
            .zip(values.iter())
            .filter(|(_, c)| c.is_nan())
        {
            log::trace!("{} K is outside of the Apiezon N fit range", t);
        }
        log::debug!(
            "Evaluated Apiezon N specific heat for {} temperature(s) of shape {:?}, {} out of range",
            values.len(),
            shape,
            values.iter().filter(|c| c.is_nan()).count()
        );

        SpecificHeats {
            shape,
            temperatures,
            values,
            integral,
        }
    }
}

impl SpecificHeats {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// The single value, if the input was a scalar
    pub fn as_scalar(&self) -> Option<f64> {
        if self.is_scalar() {
            self.values.first().copied()
        } else {
            None
        }
    }

    /// Specific heats [uJ/(g.K)], row-major
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Temperatures [K] the values were evaluated at, row-major
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a multi-dimensional index, `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(self.shape.iter()) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        self.values.get(flat).copied()
    }

    pub fn out_of_range_count(&self) -> usize {
        self.values.iter().filter(|c| c.is_nan()).count()
    }

    /// Values as dimensioned quantities
    pub fn quantities(&self) -> impl Iterator<Item = SpecificHeatCapacity> + '_ {
        self.values.iter().map(|&c| {
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
                c * JOULE_PER_KILOGRAM_KELVIN_PER_UNIT,
            )
        })
    }

    /// Two dimensional results as a matrix [uJ/(g.K)], `None` for other shapes.
    pub fn to_matrix(&self) -> Option<DMatrix<f64>> {
        match self.shape[..] {
            [rows, cols] => Some(DMatrix::from_row_slice(rows, cols, &self.values)),
            _ => None,
        }
    }

    pub fn echo(&self) -> EchoDisplayer<'_> {
        EchoDisplayer { heats: self }
    }
}

/// Human readable sentences, one line per value.
#[derive(Copy, Clone, Debug)]
pub struct EchoDisplayer<'a> {
    heats: &'a SpecificHeats,
}

impl<'a> fmt::Display for EchoDisplayer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (t, c) in self.heats.temperatures.iter().zip(self.heats.values.iter()) {
            write!(
                f,
                "The specific heat of Apiezon N at {} K is ",
                format_temperature(*t, self.heats.integral)
            )?;
            if c.is_nan() {
                write!(f, "nan")?;
            } else {
                write!(f, "{:.1}", c)?;
            }
            writeln!(f, " uJg^(-1)K^(-1)")?;
        }
        Ok(())
    }
}

/// Temperature as the echo text has always printed it: integers without a
/// fractional part, other values in shortest round-trip form with lowercase
/// `nan`/`inf`, switching to a signed exponent of at least two digits
/// outside of [1e-4, 1e16).
fn format_temperature(t: f64, integral: bool) -> String {
    if t.is_nan() {
        return "nan".into();
    }
    if t.is_infinite() {
        return if t > 0.0 { "inf" } else { "-inf" }.into();
    }
    if integral {
        return format!("{}", t);
    }

    let scientific = format!("{:e}", t);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) if !(-4..16).contains(&exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            _ => format_positional(t),
        },
        None => format_positional(t),
    }
}

fn format_positional(t: f64) -> String {
    let positional = format!("{}", t);
    if positional.contains('.') {
        positional
    } else {
        positional + ".0"
    }
}
