// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::PathBuf;

use clap::Parser;
use log::debug;

use crate::errors::PrepError;
use crate::filter::{run_filter, FilterConfig};

const AFTER_HELP: &str = "\
Examples:
  remove_acc input.fasta accessions.txt -o output.fasta
  remove_acc input.fasta accessions.txt > output.fasta

The accession file should contain one accession number per line ('#' comments and blank lines are
ignored). Accessions are matched against the first word in the FASTA header (after '>').";

/// Remove sequences from a FASTA file based on accession numbers
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
struct Cli {
    /// Input FASTA file
    fasta_file: PathBuf,

    /// Text file with accession numbers to remove (one per line)
    accession_file: PathBuf,

    /// Output FASTA file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> FilterConfig {
        FilterConfig {
            fasta_path: self.fasta_file,
            accession_path: self.accession_file,
            output_path: self.output,
        }
    }
}

pub fn run() -> Result<(), PrepError> {
    super::init_logging();

    let cli = Cli::parse();
    debug!("{:?}", cli);
    run_filter(&cli.into_config())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_positional_only() {
        let cli = Cli::try_parse_from(["remove_acc", "in.fa", "acc.txt"]).unwrap();
        let cfg = cli.into_config();
        assert_eq!(cfg.fasta_path, PathBuf::from("in.fa"));
        assert_eq!(cfg.accession_path, PathBuf::from("acc.txt"));
        assert!(cfg.destination().is_none());
    }

    #[test]
    fn test_cli_output_flag() {
        for flag in ["-o", "--output"] {
            let cli = Cli::try_parse_from(["remove_acc", "in.fa", "acc.txt", flag, "out.fa"])
                .unwrap();
            assert_eq!(cli.output, Some(PathBuf::from("out.fa")));
        }
    }

    #[test]
    fn test_cli_requires_both_inputs() {
        assert!(Cli::try_parse_from(["remove_acc", "in.fa"]).is_err());
    }
}
