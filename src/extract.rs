// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// Extraction of per-taxon protein sequences from a BLAST database, via blastdbcmd.

use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::Command,
};

use itertools::Itertools;
use log::{debug, info};

use crate::errors::PrepError;

pub const DEFAULT_DBTYPE: &str = "prot";
// Accession_TaxID, title, then the sequence. blastdbcmd writes the "\n" literally.
pub const DEFAULT_OUTFMT: &str = r">%a_%T %t\n%s";
pub const DIR_INTERMEDIATE_NAME: &str = "euk_nr.txt";
pub const DIR_FASTA_NAME: &str = "euk_nr.faa";

pub fn parse_taxon_ids<R: BufRead>(reader: R) -> Result<Vec<String>, PrepError> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let l = line?;
        let l = l.trim();
        if l.is_empty() {
            continue;
        }
        if let Some(first) = l.split('\t').next() {
            ids.push(first.to_string());
        }
    }
    Ok(ids)
}

pub fn read_taxon_ids<P: AsRef<Path>>(path: P) -> Result<Vec<String>, PrepError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PrepError::from_open(e, path))?;
    parse_taxon_ids(BufReader::new(file))
}

/// The two files written by an extraction: blastdbcmd's raw output and the final FastA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub intermediate: PathBuf,
    pub fasta: PathBuf,
}

impl OutputPaths {
    // An existing directory gets fixed file names; anything else is a prefix.
    pub fn resolve(output: &Path) -> Self {
        if output.is_dir() {
            OutputPaths {
                intermediate: output.join(DIR_INTERMEDIATE_NAME),
                fasta: output.join(DIR_FASTA_NAME),
            }
        } else {
            OutputPaths {
                intermediate: with_suffix(output, ".txt"),
                fasta: with_suffix(output, ".faa"),
            }
        }
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut s = prefix.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

#[derive(Debug, Clone)]
pub struct BlastDbCmd {
    pub program: PathBuf,
    pub taxids: Vec<String>,
    pub database: PathBuf,
    pub out: PathBuf,
    pub dbtype: String,
    pub outfmt: String,
    pub target_only: bool,
}

impl BlastDbCmd {
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-taxids".into(),
            self.taxids.iter().join(",").into(),
            "-db".into(),
            self.database.clone().into(),
            "-out".into(),
            self.out.clone().into(),
            "-dbtype".into(),
            self.dbtype.clone().into(),
            "-outfmt".into(),
            self.outfmt.clone().into(),
        ];
        if self.target_only {
            args.push("-target_only".into());
        }
        args
    }

    // For logging only; no shell quoting.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str().to_owned())
            .chain(self.args())
            .map(|a| a.to_string_lossy().into_owned())
            .join(" ")
    }

    pub fn run(&self) -> Result<(), PrepError> {
        info!("Running: {}", self.command_line());
        let output = Command::new(&self.program)
            .args(self.args())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PrepError::Tool(format!(
                    "{} not found. Please ensure BLAST+ is installed.",
                    self.program.display()
                )),
                _ => PrepError::Tool(format!("Failed to run {}: {}", self.program.display(), e)),
            })?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(PrepError::Tool(format!(
                "{} failed ({}): {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }
        if !stdout.trim().is_empty() {
            info!("{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            info!("{}", stderr.trim_end());
        }
        Ok(())
    }
}

fn unescape_newlines(line: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < line.len() {
        if line[i] == b'\\' && line.get(i + 1) == Some(&b'n') {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(line[i]);
            i += 1;
        }
    }
}

/// Copies `reader` to `writer`, turning each literal `\n` (backslash, 'n') into a newline.
pub fn convert_literal_newlines<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<(), PrepError> {
    let mut line: Vec<u8> = Vec::new();
    let mut converted: Vec<u8> = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        converted.clear();
        unescape_newlines(&line, &mut converted);
        writer.write_all(&converted)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn convert_literal_newlines_file(input: &Path, output: &Path) -> Result<(), PrepError> {
    let in_file = File::open(input).map_err(|e| PrepError::from_open(e, input))?;
    let out_file = File::create(output).map_err(|e| PrepError::from_create(e, output))?;
    convert_literal_newlines(BufReader::new(in_file), BufWriter::new(out_file))?;
    info!(
        "Converted literal newlines: {} -> {}",
        input.display(),
        output.display()
    );
    Ok(())
}

/// One run of the database extraction, as assembled from the command line and config.
#[derive(Debug, Clone)]
pub struct ExtractJob {
    pub taxon_list: PathBuf,
    pub database: PathBuf,
    pub output: PathBuf,
    pub dbtype: String,
    pub outfmt: String,
    pub target_only: bool,
    pub blastdbcmd: PathBuf,
}

impl ExtractJob {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>, R: Into<PathBuf>>(
        taxon_list: P,
        database: Q,
        output: R,
    ) -> Self {
        ExtractJob {
            taxon_list: taxon_list.into(),
            database: database.into(),
            output: output.into(),
            dbtype: String::from(DEFAULT_DBTYPE),
            outfmt: String::from(DEFAULT_OUTFMT),
            target_only: true,
            blastdbcmd: PathBuf::from("blastdbcmd"),
        }
    }

    /// Runs the extraction and returns the path of the final FastA.
    pub fn run(&self) -> Result<PathBuf, PrepError> {
        let paths = OutputPaths::resolve(&self.output);
        debug!("output paths: {:?}", paths);

        info!("Reading taxon IDs from {}...", self.taxon_list.display());
        let taxids = read_taxon_ids(&self.taxon_list)?;
        info!("Found {} taxon IDs", taxids.len());

        info!(
            "Extracting sequences from database {}...",
            self.database.display()
        );
        let cmd = BlastDbCmd {
            program: self.blastdbcmd.clone(),
            taxids,
            database: self.database.clone(),
            out: paths.intermediate.clone(),
            dbtype: self.dbtype.clone(),
            outfmt: self.outfmt.clone(),
            target_only: self.target_only,
        };
        cmd.run()?;

        info!("Processing output file...");
        convert_literal_newlines_file(&paths.intermediate, &paths.fasta)?;

        info!("Done! Final output: {}", paths.fasta.display());
        Ok(paths.fasta)
    }
}
