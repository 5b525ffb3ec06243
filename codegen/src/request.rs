//! Payload types for handing generated code to a remote compile service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target board, serialised as its fully qualified board name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Board {
    #[default]
    #[serde(rename = "arduino:avr:uno")]
    Uno,
    #[serde(rename = "arduino:avr:nano")]
    Nano,
    #[serde(rename = "arduino:avr:mega")]
    Mega,
}

impl Board {
    pub const ALL: [Board; 3] = [Board::Uno, Board::Nano, Board::Mega];

    pub fn fqbn(self) -> &'static str {
        match self {
            Board::Uno => "arduino:avr:uno",
            Board::Nano => "arduino:avr:nano",
            Board::Mega => "arduino:avr:mega",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Board::Uno => "uno",
            Board::Nano => "nano",
            Board::Mega => "mega",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fqbn())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBoard(pub String);

impl fmt::Display for UnknownBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown board '{}' (expected uno, nano, mega or a full arduino:avr name)",
            self.0
        )
    }
}

impl std::error::Error for UnknownBoard {}

/// Accepts either the short name (`nano`) or the FQBN (`arduino:avr:nano`).
impl FromStr for Board {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Board::ALL
            .into_iter()
            .find(|b| b.short_name() == wanted || b.fqbn() == wanted)
            .ok_or_else(|| UnknownBoard(s.to_string()))
    }
}

/// Request body: `{ "code": ..., "board": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub code: String,
    pub board: Board,
}

impl CompileRequest {
    pub fn new(code: impl Into<String>, board: Board) -> Self {
        CompileRequest {
            code: code.into(),
            board,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Response body: the compiled image as hex text, or an error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileResponse {
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CompileResponse {
    /// A response without hex text is a failure, with or without a message.
    pub fn into_result(self) -> Result<String, String> {
        match (self.hex, self.error) {
            (_, Some(error)) => Err(error),
            (Some(hex), None) => Ok(hex),
            (None, None) => Err("compile service returned no output".to_string()),
        }
    }
}
