//! The optional TOML config file, which provides defaults for the CLI arguments.

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize};

/// Defaults read from a config file.  Anything given on the command line takes precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the method that touches are pricked in
    pub method: Option<String>,
    /// Format used to print the touch (`text` or `siril`).  If not set, the touch isn't printed.
    pub format: Option<String>,
    /// If `true`, every row of the touch is printed
    #[serde(default)]
    pub print_rows: bool,
    /// Set to `false` to disable coloured output
    #[serde(default = "get_true")]
    pub colour: bool,
}

impl Config {
    pub fn read_from_file(path: &Path) -> Result<Self, TomlReadError> {
        read_toml(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: None,
            format: None,
            print_rows: false,
            colour: true,
        }
    }
}

fn get_true() -> bool {
    true
}

/// Error generated when a user tries to read a TOML file from the FS
#[derive(Debug)]
pub enum TomlReadError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for TomlReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TomlReadError::Io(e) => write!(f, "Error reading file: {}", e),
            TomlReadError::Parse(e) => write!(f, "Error parsing TOML: {}", e),
        }
    }
}

impl std::error::Error for TomlReadError {}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, TomlReadError> {
    let buf = std::fs::read_to_string(path).map_err(TomlReadError::Io)?;
    toml::from_str(&buf).map_err(TomlReadError::Parse)
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn parse() {
        let config: Config = toml::from_str(
            r#"
            method = "Erin"
            format = "siril"
            print_rows = true
            "#,
        )
        .unwrap();
        assert_eq!(config.method.as_deref(), Some("Erin"));
        assert_eq!(config.format.as_deref(), Some("siril"));
        assert!(config.print_rows);
        assert!(config.colour);
    }

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_fields() {
        assert!(toml::from_str::<Config>("stage = 11").is_err());
    }

    #[test]
    fn missing_file() {
        let err = Config::read_from_file("definitely/not/a/file.toml".as_ref()).unwrap_err();
        assert!(matches!(err, super::TomlReadError::Io(_)));
    }
}
