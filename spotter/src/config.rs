//! Configuration-related functionality for Spotter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::fs::maybe_canonicalize;
use crate::view::DEFAULT_ZOOM;
use crate::Error;

/// The table loaded when no source is configured.
pub const DEFAULT_SOURCE: &str = "Spottable v2.csv";

/// Spotter configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Path to the table of spots.
    pub source: PathBuf,
    /// Field separator of the table. Detected from the content if not given.
    /// Either a single ASCII character or `"tab"`.
    pub delimiter: Option<String>,
    /// Initial zoom level suggested for map views.
    pub zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            delimiter: None,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Config {
    /// Load configuration from the given JSON or YAML file, determining its
    /// format from the file extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::CannotDetermineFileType(path.to_path_buf()))?;
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(path.display().to_string(), e))?;
        Ok(match ext {
            "json" => serde_json::from_str(&content)?,
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            _ => return Err(Error::CannotDetermineFileType(path.to_path_buf())),
        })
    }

    /// Load configuration from the given file if it exists, falling back to
    /// the default configuration otherwise.
    pub fn load_or_default<P: AsRef<Path>>(maybe_config_file: P) -> Result<Self> {
        let maybe_config_file = maybe_config_file.as_ref();
        match maybe_canonicalize(maybe_config_file)? {
            Some(config_path) => {
                let config = Self::load_from_file(&config_path)
                    .wrap_err_with(|| Error::FailedToLoadConfig(config_path.clone()))?;
                debug!("Loaded configuration from {}", config_path.display());
                Ok(config)
            }
            None => {
                debug!(
                    "No such configuration file, using defaults: {}",
                    maybe_config_file.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn with_source<P: Into<PathBuf>>(mut self, source: P) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// The configured delimiter as a byte, if one is configured.
    pub fn delimiter_byte(&self) -> Result<Option<u8>, Error> {
        self.delimiter.as_deref().map(parse_delimiter).transpose()
    }
}

/// Parses a delimiter given as a single ASCII character, `\t` or `"tab"`.
pub fn parse_delimiter(s: &str) -> Result<u8, Error> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(Error::InvalidDelimiter(s.to_string())),
    }
}
