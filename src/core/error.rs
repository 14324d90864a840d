use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum OError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("The validation of the {0} failed: {1}")]
    Validation(String, String),
    #[error("The {0} index {1} is out of bounds (the size is {2})")]
    OutOfRange(String, usize, usize),
    #[error("An error occurred when exporting the point set: {0}")]
    Export(String),
    #[error("An error occurred when importing the point set: {0}")]
    Import(String),
}
