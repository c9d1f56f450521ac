// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::{Path, PathBuf};

use kaiju_dbprep::seq::fasta::header_accession;

// A FastA record as (accession, full text including header and body lines).
#[allow(dead_code)]
pub fn records(text: &str) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = Vec::new();
    for line in text.split_inclusive('\n') {
        match header_accession(line) {
            Some(acc) => result.push((acc.to_string(), line.to_string())),
            None => match result.last_mut() {
                Some((_, body)) => body.push_str(line),
                None => panic!("line before first header: {:?}", line),
            },
        }
    }
    result
}

#[allow(dead_code)]
pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("writing test file");
    path
}
