//! Error module for the NeuroTick library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum SimulationError {
    /// Error for invalid configuration parameters, e.g., non-positive distance or velocity.
    InvalidParameter(String),
    /// Error for cell not found in the network.
    CellNotFound(usize),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
            SimulationError::CellNotFound(id) => {
                write!(f, "Cell {} not found in the network", id)
            }
            SimulationError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SimulationError {}
