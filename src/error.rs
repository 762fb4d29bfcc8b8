use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The temperature argument is not a number, a list of numbers or a rectangular
    /// numeric array.
    #[error("Invalid temperature type ({found}). Expected a number, a list of numbers or a numeric array")]
    InvalidInputType { found: String },

    #[error("Array shape {shape:?} does not hold {len} values")]
    ShapeMismatch { shape: Vec<usize>, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
