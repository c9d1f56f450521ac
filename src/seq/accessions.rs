// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::errors::PrepError;

pub const COMMENT_MARKER: char = '#';

// Accessions whose records are dropped. Built once, then only looked up.
pub type ExclusionSet = HashSet<String>;

pub fn parse_exclusion_list<R: BufRead>(reader: R) -> Result<ExclusionSet, PrepError> {
    let mut result = ExclusionSet::new();
    for (idx, line) in reader.lines().enumerate() {
        let l = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                PrepError::Format(format!("line {}: invalid UTF-8", idx + 1))
            }
            _ => PrepError::Io(e),
        })?;
        let acc = l.trim();
        if acc.is_empty() || acc.starts_with(COMMENT_MARKER) {
            continue;
        }
        result.insert(acc.to_string());
    }
    Ok(result)
}

pub fn read_exclusion_file<P: AsRef<Path>>(path: P) -> Result<ExclusionSet, PrepError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PrepError::from_open(e, path))?;
    let set = parse_exclusion_list(BufReader::new(file)).map_err(|e| match e {
        PrepError::Format(msg) => PrepError::Format(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    debug!("{} distinct accession(s) in {}", set.len(), path.display());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exclusion_list_00() {
        let set = parse_exclusion_list("B\nP12345\n".as_bytes()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("B"));
        assert!(set.contains("P12345"));
    }

    #[test]
    fn test_parse_exclusion_list_strips_whitespace() {
        let set = parse_exclusion_list("  Q9XYZ1 \r\n\tA0A000\t\n".as_bytes()).unwrap();
        assert!(set.contains("Q9XYZ1"));
        assert!(set.contains("A0A000"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_comments_and_blanks_are_not_keys() {
        let set = parse_exclusion_list("# header\n\n   \n  # indented comment\n".as_bytes())
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_hash_inside_accession_is_kept() {
        // Only a leading '#' marks a comment.
        let set = parse_exclusion_list("A#1\n".as_bytes()).unwrap();
        assert!(set.contains("A#1"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = parse_exclusion_list("B\nB\n B\n".as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let bytes: &[u8] = b"A\nB\xff\n";
        match parse_exclusion_list(bytes) {
            Err(PrepError::Format(msg)) => assert_eq!(msg, "line 2: invalid UTF-8"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_read_missing_exclusion_file() {
        match read_exclusion_file("no/such/accessions.txt") {
            Err(PrepError::NotFound(p)) => assert_eq!(p, Path::new("no/such/accessions.txt")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
