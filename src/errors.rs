// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    error::Error,
    fmt, io,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum PrepError {
    Io(io::Error),
    NotFound(PathBuf),
    Format(String),
    Tool(String),
    Usage(String),
}

impl PrepError {
    // Maps a failed File::open() so that a missing input names its path.
    pub fn from_open(e: io::Error, path: &Path) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => PrepError::NotFound(path.to_path_buf()),
            _ => PrepError::from_read(e, path),
        }
    }

    // Output files: a missing parent directory is still an I/O error, not a missing input.
    pub fn from_create(e: io::Error, path: &Path) -> Self {
        PrepError::from_read(e, path)
    }

    // Any other I/O failure on a named file, e.g. reading a directory opened as a file.
    pub fn from_read(e: io::Error, path: &Path) -> Self {
        PrepError::Io(io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    }
}

// These allow conversion to PrepError, required for the runners to return Result<()> and for '?'
// to work.

impl From<io::Error> for PrepError {
    fn from(e: io::Error) -> Self {
        PrepError::Io(e)
    }
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepError::Io(e) => write!(f, "I/O error: {}", e),
            PrepError::NotFound(path) => write!(f, "File not found: '{}'", path.display()),
            PrepError::Format(msg) => write!(f, "Format error: {}", msg),
            PrepError::Tool(msg) => write!(f, "Tool error: {}", msg),
            PrepError::Usage(msg) => write!(f, "Usage error: {}", msg),
        }
    }
}

impl Error for PrepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PrepError::Io(e) => Some(e),
            _ => None,
        }
    }
}
