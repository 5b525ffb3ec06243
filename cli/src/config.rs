use std::path::{Path, PathBuf};

use codegen::Board;
use serde::Deserialize;

pub const DEFAULT_CONFIG: &str = "blockc.toml";

/// Project settings read from `blockc.toml`. Command-line flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Board short name (`uno`) or FQBN (`arduino:avr:uno`).
    #[serde(default)]
    pub board: Option<String>,

    /// Where `generate` writes when `-o` is not given.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load `explicit` if given (it must exist), otherwise `blockc.toml` in
    /// the current directory if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG);
                if !default.is_file() {
                    return Ok(Config::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        let config = Config::parse(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Config, String> {
        let config: Config = toml::from_str(text).map_err(|e| e.to_string())?;
        config.board()?;
        Ok(config)
    }

    pub fn board(&self) -> Result<Option<Board>, String> {
        self.board
            .as_deref()
            .map(|name| name.parse::<Board>().map_err(|e| e.to_string()))
            .transpose()
    }
}
