// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchboard split` and `switchboard classify`.
//!
//! Both read one raw reply segment from a file or stdin and print JSON lines.

use std::io::{Read, Write};
use std::path::Path;

use switchboard_core::SwitchboardError;
use switchboard_parser::{parse_segment, split_fragments};

/// Read the whole input from `file`, or from stdin when `None`.
pub fn read_input(file: Option<&Path>) -> Result<String, SwitchboardError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Print every fragment as a JSON string, one per line.
pub fn split(segment: &str, out: &mut impl Write) -> Result<(), SwitchboardError> {
    for fragment in split_fragments(segment) {
        let line = serde_json::to_string(&fragment)
            .map_err(|e| SwitchboardError::payload("encoding fragment", e))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Print every fragment with its outcomes, one JSON object per line.
pub fn classify(segment: &str, out: &mut impl Write) -> Result<(), SwitchboardError> {
    for classified in parse_segment(segment) {
        let line = serde_json::to_string(&classified)
            .map_err(|e| SwitchboardError::payload("encoding classified fragment", e))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}
