// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::io::{BufRead, Write};

use log::debug;

use crate::errors::PrepError;
use crate::seq::accessions::ExclusionSet;

pub const HEADER_MARKER: char = '>';

/// Record counts from one filtering pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub removed: usize,
}

/// Returns the accession of a header line, or None if `line` is not a header.
///
/// The accession is the text right after the marker, up to the first whitespace. A marker
/// followed by whitespace therefore yields an empty accession.
pub fn header_accession(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(HEADER_MARKER)?;
    Some(rest.split(char::is_whitespace).next().unwrap_or_default())
}

/// Copies `reader` to `writer`, dropping every record whose accession is in `excluded`.
///
/// Lines are copied as raw bytes, line endings included, so kept records come out unchanged.
/// Only one line is held at a time. Lines before the first header are never suppressed, and a
/// header with no body is a record like any other. Input that is not valid UTF-8 stops the pass
/// with a [`PrepError::Format`] naming the offending line.
pub fn filter_fasta<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    excluded: &ExclusionSet,
) -> Result<FilterStats, PrepError> {
    let mut stats = FilterStats::default();
    let mut suppressing = false;
    let mut buf: Vec<u8> = Vec::new();
    let mut line_num: usize = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;
        let line = std::str::from_utf8(&buf)
            .map_err(|_| PrepError::Format(format!("line {}: invalid UTF-8", line_num)))?;
        if let Some(acc) = header_accession(line) {
            suppressing = excluded.contains(acc);
            if suppressing {
                debug!("removing {}", acc);
                stats.removed += 1;
            } else {
                stats.kept += 1;
            }
        }
        if !suppressing {
            writer.write_all(&buf)?;
        }
    }
    writer.flush()?;
    Ok(stats)
}
