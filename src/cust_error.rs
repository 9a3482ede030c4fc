//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;

/// Errors raised while building a `WeightedGraph` from external input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GraphError {
    VertexOutOfRange { vertex: usize, num_vertices: usize },
    SelfLoop(usize),
    /// Weights have to be strictly positive.
    ZeroWeight(usize),
    WeightCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange { vertex, num_vertices } => {
                write!(f, "Graph: vertex {} is out of range (graph has {} vertices)", vertex, num_vertices)
            },
            Self::SelfLoop(v) => write!(f, "Graph: self loop at vertex {}", v),
            Self::ZeroWeight(v) => write!(f, "Graph: vertex {} has weight 0", v),
            Self::WeightCountMismatch { expected, found } => {
                write!(f, "Graph: expected {} weights, found {}", expected, found)
            },
        }
    }
}

impl Error for GraphError {}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ProcessingError {
    InvalidParameter(String),
    UnknownStrategy(String),
    InvalidSolution(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Self::UnknownStrategy(name) => write!(f, "Unknown strategy: {}", name),
            Self::InvalidSolution(msg) => write!(f, "InvalidSolution: {}", msg),
        }
    }
}

impl Error for ProcessingError {}
