//! Data source handling.

use std::{fs, path::PathBuf};

use crate::Error;

/// Where the raw table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A delimited text file on the local file system.
    File(PathBuf),
    /// Table content held in memory.
    Inline(String),
}

impl Source {
    /// Reads the entire content of the source.
    ///
    /// Reading is all-or-nothing: any failure is reported for the source as a
    /// whole.
    pub fn read(&self) -> Result<Vec<u8>, Error> {
        match self {
            Self::File(path) => fs::read(path).map_err(|e| {
                Error::LoadFromFile(
                    path.clone(),
                    Box::new(Error::Io(path.display().to_string(), e)),
                )
            }),
            Self::Inline(content) => Ok(content.as_bytes().to_vec()),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(_) => write!(f, "<inline>"),
        }
    }
}
