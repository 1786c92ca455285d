//! Perft suite file loading.
//!
//! A suite is a TOML file listing positions with their reference node
//! counts:
//!
//! ```toml
//! [[position]]
//! name = "startpos"
//! fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! expected = [20, 400, 8902]
//! ```

use chess_core::FenError;
use chess_engine::Position;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a suite.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the suite file from disk.
    #[error("Failed to read suite file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the suite file as valid TOML.
    #[error("Failed to parse suite: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A suite entry carries a FEN the engine cannot load.
    #[error("Invalid FEN for {name}: {source}")]
    InvalidFen { name: String, source: FenError },
}

/// One position of a perft suite.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SuitePosition {
    /// Label used in the report.
    pub name: String,
    /// Position in Forsyth-Edwards Notation.
    pub fen: String,
    /// Reference node counts; `expected[0]` is depth 1.
    #[serde(default)]
    pub expected: Vec<u64>,
    /// Deepest depth to check. Defaults to every depth listed in `expected`.
    #[serde(default)]
    pub max_depth: Option<u32>,
}

impl SuitePosition {
    /// Parses the entry's FEN.
    pub fn position(&self) -> Result<Position, ConfigError> {
        Position::from_fen(&self.fen).map_err(|source| ConfigError::InvalidFen {
            name: self.name.clone(),
            source,
        })
    }

    /// The (depth, expected nodes) pairs to check, shallowest first.
    pub fn checks(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        let limit = self.max_depth.unwrap_or(u32::MAX);
        (1u32..)
            .zip(self.expected.iter().copied())
            .take_while(move |(depth, _)| *depth <= limit)
    }
}

/// A list of positions with reference perft counts.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Suite {
    #[serde(default, rename = "position")]
    pub positions: Vec<SuitePosition>,
}

impl Suite {
    /// Loads a suite from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a suite from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the bundled suite of standard reference positions.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::parse(include_str!("../suites/standard.toml"))
    }
}
