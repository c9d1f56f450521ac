// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    fs::File,
    io::{stdout, BufRead, BufReader, BufWriter, Cursor, Read},
    path::{Path, PathBuf},
};

use log::info;

use crate::errors::PrepError;
use crate::seq::accessions::read_exclusion_file;
use crate::seq::fasta::{filter_fasta, FilterStats};

// Where an output path of "-" (or none at all) sends the filtered FastA.
pub const STDOUT_PATH: &str = "-";

/// One invocation of the accession filter.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub fasta_path: PathBuf,
    pub accession_path: PathBuf,
    pub output_path: Option<PathBuf>,
}

impl FilterConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(fasta_path: P, accession_path: Q) -> Self {
        FilterConfig {
            fasta_path: fasta_path.into(),
            accession_path: accession_path.into(),
            output_path: None,
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output_path: P) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    // None means standard output.
    pub fn destination(&self) -> Option<&Path> {
        self.output_path
            .as_deref()
            .filter(|p| p.as_os_str() != STDOUT_PATH)
    }
}

// Reads and checks the first line before anything is written, then hands it back in front of
// the rest of the input.
fn read_first_line<R: BufRead>(mut reader: R, path: &Path) -> Result<impl BufRead, PrepError> {
    let mut first: Vec<u8> = Vec::new();
    reader
        .read_until(b'\n', &mut first)
        .map_err(|e| PrepError::from_read(e, path))?;
    if std::str::from_utf8(&first).is_err() {
        return Err(PrepError::Format(format!(
            "{}: line 1: invalid UTF-8",
            path.display()
        )));
    }
    Ok(Cursor::new(first).chain(reader))
}

// True if both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Runs the filter described by `config`.
///
/// Both inputs are opened, and the first FastA line read, before the output is created. An
/// input that is missing or unreadable from the start never truncates an existing output file.
/// Writing over either input is refused.
pub fn run_filter(config: &FilterConfig) -> Result<FilterStats, PrepError> {
    if let Some(path) = config.destination() {
        for input in [&config.fasta_path, &config.accession_path] {
            if same_file(input, path) {
                return Err(PrepError::Usage(format!(
                    "output {} would overwrite input {}",
                    path.display(),
                    input.display()
                )));
            }
        }
    }

    let fasta = File::open(&config.fasta_path)
        .map_err(|e| PrepError::from_open(e, &config.fasta_path))?;
    let excluded = read_exclusion_file(&config.accession_path)?;
    info!("Loaded {} accession(s) to remove", excluded.len());

    let reader = read_first_line(BufReader::new(fasta), &config.fasta_path)?;
    let stats = match config.destination() {
        Some(path) => {
            let out = File::create(path).map_err(|e| PrepError::from_create(e, path))?;
            filter_fasta(reader, BufWriter::new(out), &excluded)
        }
        None => {
            let out = stdout().lock();
            filter_fasta(reader, BufWriter::new(out), &excluded)
        }
    }
    .map_err(|e| match e {
        PrepError::Format(msg) => {
            PrepError::Format(format!("{}: {}", config.fasta_path.display(), msg))
        }
        other => other,
    })?;

    info!(
        "Kept {} sequences, removed {} sequences",
        stats.kept, stats.removed
    );
    Ok(stats)
}
