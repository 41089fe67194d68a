//! Decoder for enumerate-script output.
//!
//! The format is untrusted and schema-less, so decoding fails closed: a short
//! record, a non-integer id or an unknown flag value is an
//! [`Error::Parse`], never a defaulted field. Dropping a short line could
//! hide a partially failed bridge call.

// ============================================================================
// Imports
// ============================================================================

use crate::bridge::{FIELD_COUNT, FIELD_DELIMITER};
use crate::error::{Error, Result};
use crate::identifiers::{TabId, WindowId};

use super::{Snapshot, TabRecord};

// ============================================================================
// Constants
// ============================================================================

/// Literal the bridge prints for an active tab.
const ACTIVE_TRUE: &str = "true";

/// Literal the bridge prints for an inactive tab.
const ACTIVE_FALSE: &str = "false";

// ============================================================================
// TabLine
// ============================================================================

/// One decoded record, before grouping into windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLine {
    /// 1-based line number in the bridge output.
    pub line: usize,
    /// 1-based window position reported on this line.
    pub window_position: usize,
    /// The tab, including its window id.
    pub tab: TabRecord,
}

// ============================================================================
// Functions
// ============================================================================

/// Parses raw enumerate output into a [`Snapshot`].
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed records or for output that breaks
/// snapshot invariants (duplicate tab ids, gaps in positions).
pub fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    let lines = parse_lines(raw)?;
    Snapshot::from_lines(lines)
}

/// Decodes every non-blank line of `raw`.
///
/// # Errors
///
/// Returns [`Error::Parse`] on the first malformed line.
pub fn parse_lines(raw: &str) -> Result<Vec<TabLine>> {
    raw.lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| parse_line(i + 1, text))
        .collect()
}

/// Decodes a single record.
///
/// # Errors
///
/// Returns [`Error::Parse`] tagged with `line`.
pub fn parse_line(line: usize, text: &str) -> Result<TabLine> {
    // `str::lines` only drops a `\r` that precedes `\n`.
    let text = text.strip_suffix('\r').unwrap_or(text);
    let fields: Vec<&str> = text.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return Err(Error::parse(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let window_id = parse_id(line, "window id", fields[0])?;
    let window_position = parse_position(line, "window index", fields[1])?;
    let tab_id = parse_id(line, "tab id", fields[2])?;
    let tab_position = parse_position(line, "tab index", fields[3])?;
    let is_active = parse_flag(line, fields[4])?;

    Ok(TabLine {
        line,
        window_position,
        tab: TabRecord {
            id: TabId::new(tab_id).ok_or_else(|| Error::parse(line, "tab id must be positive"))?,
            window_id: WindowId::new(window_id)
                .ok_or_else(|| Error::parse(line, "window id must be positive"))?,
            position: tab_position,
            is_active,
            title: fields[5].to_string(),
            url: fields[6].to_string(),
        },
    })
}

fn parse_id(line: usize, name: &str, field: &str) -> Result<u64> {
    field
        .parse::<u64>()
        .map_err(|_| Error::parse(line, format!("{name} '{field}' is not an integer")))
}

fn parse_position(line: usize, name: &str, field: &str) -> Result<usize> {
    match field.parse::<usize>() {
        Ok(0) => Err(Error::parse(line, format!("{name} must be positive"))),
        Ok(position) => Ok(position),
        Err(_) => Err(Error::parse(
            line,
            format!("{name} '{field}' is not an integer"),
        )),
    }
}

fn parse_flag(line: usize, field: &str) -> Result<bool> {
    match field {
        ACTIVE_TRUE => Ok(true),
        ACTIVE_FALSE => Ok(false),
        other => Err(Error::parse(
            line,
            format!("active flag '{other}' is neither 'true' nor 'false'"),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
