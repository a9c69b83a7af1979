use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SemanticError>;

#[derive(Error, Debug)]
pub enum SemanticError {
    #[error("Cannot read word list {path}: {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unit {0} is not part of the code unit index")]
    UnknownUnit(String),
}
