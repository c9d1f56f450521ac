// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::PathBuf;

use clap::Parser;
use log::{debug, warn};

use crate::config::{find_prep_config, PrepConfig};
use crate::errors::PrepError;
use crate::extract::{ExtractJob, DEFAULT_DBTYPE, DEFAULT_OUTFMT};

const AFTER_HELP: &str = "\
Equivalent to:
  IDS=$(cut -f1 kaiju-taxonlistEuk.tsv | paste -sd,)
  blastdbcmd -taxids $IDS -db $DB/swissprot -out $SCRATCH/euk_nr.txt -dbtype prot \\
      -outfmt '>%a_%T %t\\n%s' -target_only
  perl -p -e 's/\\\\n/\\n/' $SCRATCH/euk_nr.txt > $SCRATCH/euk_nr.faa

blastdbcmd is looked up in tools.blast_bin_dir of ~/.kaijuprepconfig (or ./.kaijuprepconfig),
then on PATH, unless --blastdbcmd is given.";

/// Prepare non-redundant protein database for Kaiju
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
struct Cli {
    /// Input TSV file with taxon IDs in first column (e.g., kaiju-taxonlistEuk.tsv)
    #[arg(short, long)]
    input: PathBuf,

    /// Path to BLAST database (e.g., /srv/db/ncbi/preformatted/swissprot)
    #[arg(short, long)]
    database: PathBuf,

    /// Output directory or file prefix
    #[arg(short, long)]
    output: PathBuf,

    /// Database type
    #[arg(long, default_value = DEFAULT_DBTYPE)]
    dbtype: String,

    /// blastdbcmd output format string
    #[arg(long, default_value = DEFAULT_OUTFMT)]
    outfmt: String,

    /// Do not use -target_only flag
    #[arg(long = "no-target-only")]
    no_target_only: bool,

    /// blastdbcmd executable (overrides the config file)
    #[arg(long)]
    blastdbcmd: Option<PathBuf>,
}

impl Cli {
    fn into_job(self, config: &PrepConfig) -> ExtractJob {
        let blastdbcmd = self.blastdbcmd.unwrap_or_else(|| config.blastdbcmd());
        ExtractJob {
            taxon_list: self.input,
            database: self.database,
            output: self.output,
            dbtype: self.dbtype,
            outfmt: self.outfmt,
            target_only: !self.no_target_only,
            blastdbcmd,
        }
    }
}

pub fn run() -> Result<(), PrepError> {
    super::init_logging();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    // A broken config file is not fatal: blastdbcmd may still be on PATH.
    let config = match find_prep_config() {
        Some(path) => PrepConfig::from_file(&path).unwrap_or_else(|e| {
            warn!("Ignoring {}: {}", path.display(), e);
            PrepConfig::default()
        }),
        None => PrepConfig::default(),
    };

    cli.into_job(&config).run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from([
            "kaiju_nr_prepare",
            "-i",
            "taxa.tsv",
            "-d",
            "/db/swissprot",
            "-o",
            "/scratch/euk",
        ])
        .unwrap();
        let job = cli.into_job(&PrepConfig::default());
        assert_eq!(job.dbtype, "prot");
        assert_eq!(job.outfmt, r">%a_%T %t\n%s");
        assert!(job.target_only);
        assert_eq!(job.blastdbcmd, PathBuf::from("blastdbcmd"));
        assert_eq!(job.taxon_list, PathBuf::from("taxa.tsv"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "kaiju_nr_prepare",
            "--input",
            "taxa.tsv",
            "--database",
            "nr",
            "--output",
            "out",
            "--dbtype",
            "nucl",
            "--no-target-only",
            "--blastdbcmd",
            "/usr/local/bin/blastdbcmd",
        ])
        .unwrap();
        let config =
            PrepConfig::from_json_str(r#"{"tools": {"blast_bin_dir": "/opt/blast/bin"}}"#)
                .unwrap();
        let job = cli.into_job(&config);
        assert_eq!(job.dbtype, "nucl");
        assert!(!job.target_only);
        assert_eq!(job.blastdbcmd, PathBuf::from("/usr/local/bin/blastdbcmd"));
    }

    #[test]
    fn test_config_supplies_blastdbcmd() {
        let cli =
            Cli::try_parse_from(["kaiju_nr_prepare", "-i", "t.tsv", "-d", "db", "-o", "o"])
                .unwrap();
        let config =
            PrepConfig::from_json_str(r#"{"tools": {"blast_bin_dir": "/opt/blast/bin"}}"#)
                .unwrap();
        let job = cli.into_job(&config);
        assert_eq!(job.blastdbcmd, PathBuf::from("/opt/blast/bin/blastdbcmd"));
    }

    #[test]
    fn test_cli_requires_database() {
        assert!(Cli::try_parse_from(["kaiju_nr_prepare", "-i", "t.tsv", "-o", "o"]).is_err());
    }
}
