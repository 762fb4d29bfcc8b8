use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::apiezon::{evaluate_json, SpecificHeats};

/// Temperatures to evaluate, as loaded from a JSON5 document.
///
/// ```json5
/// {
///     temperatures: [0.1, 1.0, 3.0],
///     echo: true,
/// }
/// ```
///
/// `temperatures` is kept dynamically typed, its type is only checked when evaluating.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EvaluationRequest {
    pub temperatures: Value,
    #[serde(default)]
    pub echo: bool,
}

impl EvaluationRequest {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let string = fs::read_to_string(path)?;
        Self::from_json(&string)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let loaded: EvaluationRequest = json5::from_str(json)?;
        Ok(loaded)
    }

    pub fn evaluate(&self) -> crate::Result<SpecificHeats> {
        evaluate_json(self.temperatures.clone(), self.echo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn request_from_json() {
        let request = EvaluationRequest::from_json(sample_request_json()).unwrap();
        check_sample_request(request);
    }

    #[test]
    fn load_request() {
        let mut f = tempfile::NamedTempFile::new().unwrap();

        use std::io::Write;
        write!(f, "{}", sample_request_json()).unwrap();

        let request = EvaluationRequest::load(f.path()).unwrap();

        check_sample_request(request);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EvaluationRequest::load(dir.path().join("missing.json5")).is_err());
    }

    #[test]
    fn echo_defaults_to_false() {
        let request = EvaluationRequest::from_json("{ temperatures: 1.0 }").unwrap();
        assert!(!request.echo);
        let heats = request.evaluate().unwrap();
        assert!(heats.is_scalar());
        assert_relative_eq!(heats.as_scalar().unwrap(), 27.1244, max_relative = 1e-12);
    }

    #[test]
    fn missing_temperatures() {
        let message = format!("{}", EvaluationRequest::from_json("{ echo: true }").unwrap_err());
        message
            .find("temperatures")
            .expect("Error message should name the missing field");
    }

    #[test]
    fn unknown_field() {
        assert!(EvaluationRequest::from_json("{ temperatures: 1, material: 'N' }").is_err());
    }

    #[test]
    fn string_temperature_is_invalid_input_type() {
        let request = EvaluationRequest::from_json("{ temperatures: 'abc' }").unwrap();
        assert_eq!(request.temperatures, json!("abc"));
        assert_matches!(request.evaluate(), Err(Error::InvalidInputType { found }) => {
            assert_eq!(found, "string");
        });
    }

    /// Provide string with sample JSON5 request
    fn sample_request_json() -> &'static str {
        r#"{
            // second row is partially out of range
            temperatures: [
                [0.1, 1.0],
                [2.5, 3.0],
            ],
            echo: true,
        }"#
    }

    fn check_sample_request(request: EvaluationRequest) {
        assert!(request.echo);
        let heats = request.evaluate().unwrap();
        assert_eq!(heats.shape(), &[2, 2]);
        assert_eq!(heats.temperatures(), &[0.1, 1.0, 2.5, 3.0]);
        assert!(heats.values()[..3].iter().all(|c| c.is_finite()));
        assert!(heats.values()[3].is_nan());
    }
}
