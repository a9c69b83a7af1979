use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("{matrix} matrix is {rows}x{cols}, expected {expected}x{expected}")]
    ShapeMismatch {
        matrix: &'static str,
        rows: usize,
        cols: usize,
        expected: usize,
    },

    #[error("Threshold {name} must be a finite number, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}
