//! JSON problem and solution files.

use bmatch::{Edge, NodeIndex, Weights};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A graph to match: capacities plus weighted edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    pub b_maxs: Vec<u32>,
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub i: NodeIndex,
    pub j: NodeIndex,
    pub weight: f64,
}

/// A stored edge list to check for inclusiveness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionFile {
    pub b_maxs: Vec<u32>,
    pub solution: Vec<Edge>,
}

#[derive(Debug)]
pub enum InputError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// The same `(i, j)` key appears twice in the edge list.
    RepeatedEdge { edge: Edge },
}

impl InputError {
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Io(_) => "INPUT_IO",
            InputError::Parse(_) => "INPUT_PARSE",
            InputError::RepeatedEdge { .. } => "INPUT_REPEATED_EDGE",
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(err) => write!(f, "[{}] Failed to read input: {}", self.code(), err),
            InputError::Parse(err) => {
                write!(f, "[{}] Failed to parse input: {}", self.code(), err)
            }
            InputError::RepeatedEdge { edge } => write!(
                f,
                "[{}] Edge ({}, {}) is listed more than once",
                self.code(),
                edge.0,
                edge.1
            ),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(err) => Some(err),
            InputError::Parse(err) => Some(err),
            InputError::RepeatedEdge { .. } => None,
        }
    }
}

impl ProblemFile {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(InputError::Io)?;
        serde_json::from_reader(BufReader::new(file)).map_err(InputError::Parse)
    }

    /// Edge list as a weight mapping.
    ///
    /// A key listed twice is an error rather than a silent overwrite.
    pub fn weights(&self) -> Result<Weights, InputError> {
        let mut weights = Weights::new();
        for entry in &self.edges {
            let edge = (entry.i, entry.j);
            if weights.insert(edge, entry.weight).is_some() {
                return Err(InputError::RepeatedEdge { edge });
            }
        }
        Ok(weights)
    }
}

impl SolutionFile {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(InputError::Io)?;
        serde_json::from_reader(BufReader::new(file)).map_err(InputError::Parse)
    }
}
