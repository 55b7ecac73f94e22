use thiserror::Error;

/// Simulation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(feature = "python")]
impl From<SimError> for pyo3::PyErr {
    fn from(err: SimError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
