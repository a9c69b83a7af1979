use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Unit {0} is not part of the code unit index")]
    UnknownUnit(String),

    #[error("Ordinal out of range: ({from}, {to}) in a {size}x{size} matrix")]
    OrdinalOutOfRange { from: usize, to: usize, size: usize },

    #[error("Relation matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}
