// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::PrepError;

pub const CONFIG_FILE_NAME: &str = ".kaijuprepconfig";

// Contents of .kaijuprepconfig, e.g.
//
//   { "tools": { "blast_bin_dir": "/opt/ncbi-blast/bin" } }
//
#[derive(Debug, Default, Deserialize)]
pub struct PrepConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolsConfig {
    pub blast_bin_dir: Option<PathBuf>,
}

impl PrepConfig {
    pub fn from_json_str(text: &str) -> Result<Self, PrepError> {
        serde_json::from_str(text).map_err(|e| PrepError::Format(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, PrepError> {
        let text = std::fs::read_to_string(path).map_err(|e| PrepError::from_open(e, path))?;
        PrepConfig::from_json_str(&text).map_err(|e| match e {
            PrepError::Format(msg) => PrepError::Format(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    // Path to blastdbcmd: in blast_bin_dir if configured, else left to PATH lookup.
    pub fn blastdbcmd(&self) -> PathBuf {
        match &self.tools.blast_bin_dir {
            Some(dir) => dir.join("blastdbcmd"),
            None => PathBuf::from("blastdbcmd"),
        }
    }
}

/// Looks for the config file in $HOME, then in the current directory.
pub fn find_prep_config() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
