use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IO(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("input file {} not found", .0.display())]
    MissingInput(PathBuf),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self { AppError::IO(format!("{}", e)) }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            AppError::IO(format!("csv: {}", e))
        } else {
            AppError::Parse(format!("csv: {}", e))
        }
    }
}
