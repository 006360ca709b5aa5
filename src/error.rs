//! Error module for the Rusty IZNN library.
use std::error::Error;
use std::fmt;

use crate::gene::NodeKey;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum IznnError {
    /// Error for a number of input values that does not match the number of declared input keys.
    InputCountMismatch { expected: usize, found: usize },
    /// Error for a neuron input whose source is neither a neuron nor a bound input value.
    MissingInputBinding(NodeKey),
    /// Error for a node required by the phenotype but absent from the genome.
    MissingNodeGene(NodeKey),
    /// Error for invalid parameters
    InvalidParameter(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for IznnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IznnError::InputCountMismatch { expected, found } => write!(
                f,
                "Input count mismatch: expected {} values, got {}",
                expected, found
            ),
            IznnError::MissingInputBinding(key) => {
                write!(f, "No neuron or input value bound to node {}", key)
            }
            IznnError::MissingNodeGene(key) => write!(f, "Node {} not found in the genome", key),
            IznnError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            IznnError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for IznnError {}

impl From<std::io::Error> for IznnError {
    fn from(e: std::io::Error) -> Self {
        IznnError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for IznnError {
    fn from(e: serde_json::Error) -> Self {
        IznnError::IOError(e.to_string())
    }
}
