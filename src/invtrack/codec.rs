//! # CSV Line Codec
//!
//! Converts records and audit entries to and from single CSV lines.
//!
//! The two files use different quoting rules and both are kept as-is so that
//! files written by earlier versions stay readable:
//!
//! - **Inventory rows** quote a field only when it contains a comma. Embedded
//!   double quotes are written raw, which means a value holding a `"` does not
//!   survive a round trip (the scanner treats it as a quote toggle).
//! - **Audit rows** quote every field and double embedded quotes. Line breaks
//!   inside a field are flattened to spaces so an entry is always one line.
//!
//! Decoding is a left-to-right pass with a quote toggle, where a comma
//! outside quotes ends a field. Audit rows additionally read `""` inside
//! quotes as one literal quote; inventory rows never do, so a hand-edited
//! `"a""b"` decodes to `ab`.
//!
//! Files are read with [`lossy_lines`]: bytes that are not UTF-8 (files
//! saved in a legacy code page) become U+FFFD instead of failing the read.

use crate::model::{AuditAction, AuditEntry, AuditStatus, InventoryRecord};
use chrono::NaiveDateTime;
use std::io::{self, BufRead};
use thiserror::Error;

pub const INVENTORY_HEADER: &str =
    "Item ID,Item Name,Category,Quantity,Unit,Location,Condition,Date Acquired";
pub const AUDIT_HEADER: &str = "Timestamp,Username,Action,IP Address,Status,Details";

pub const RECORD_COLUMNS: usize = 8;
pub const AUDIT_COLUMNS: usize = 6;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
}

/// Splits an inventory row into fields. Quote characters only toggle.
pub fn split_fields(line: &str) -> Vec<String> {
    scan_fields(line, false)
}

/// Splits an audit row into fields. Inside a quoted section a doubled
/// quote (`""`) yields one literal quote.
pub fn split_quoted_fields(line: &str) -> Vec<String> {
    scan_fields(line, true)
}

fn scan_fields(line: &str, unescape_doubled: bool) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if unescape_doubled && in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Lines of `reader` without their `\n` or `\r\n` ending, decoded lossily.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })
    })
}

fn quote_if_comma(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

fn quote_always(value: &str) -> String {
    let flattened = value.replace('"', "\"\"").replace(['\n', '\r'], " ");
    format!("\"{}\"", flattened)
}

pub fn encode_record(record: &InventoryRecord) -> String {
    record
        .fields()
        .iter()
        .map(|field| quote_if_comma(field))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn decode_record(line: &str) -> Result<InventoryRecord, ParseError> {
    let mut fields = split_fields(line);
    if fields.len() < RECORD_COLUMNS {
        return Err(ParseError::MissingColumns {
            expected: RECORD_COLUMNS,
            found: fields.len(),
        });
    }

    // A bad quantity costs the quantity, not the row.
    let quantity = fields[3].trim().parse().unwrap_or(0);

    let mut take = |i: usize| std::mem::take(&mut fields[i]);
    Ok(InventoryRecord {
        id: take(0),
        name: take(1),
        category: take(2),
        quantity,
        unit: take(4),
        location: take(5),
        condition: take(6),
        date_acquired: take(7),
    })
}

pub fn encode_audit(entry: &AuditEntry) -> String {
    let timestamp = match entry.timestamp {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => entry.raw_timestamp.clone(),
    };
    [
        timestamp,
        entry.username.clone(),
        entry.action.to_string(),
        entry.ip_address.clone(),
        entry.status.to_string(),
        entry.details.clone(),
    ]
    .iter()
    .map(|field| quote_always(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Never fails: missing trailing columns come back empty.
pub fn decode_audit(line: &str) -> AuditEntry {
    let mut fields = split_quoted_fields(line).into_iter();
    let mut next = || fields.next().unwrap_or_default();

    let raw_timestamp = next();
    let timestamp = NaiveDateTime::parse_from_str(raw_timestamp.trim(), TIMESTAMP_FORMAT).ok();
    let username = next();
    let action = next();
    let ip_address = next();
    let status = next();
    let details = next();

    AuditEntry {
        timestamp,
        raw_timestamp,
        username,
        action: action.parse().unwrap_or(AuditAction::Other(action)),
        ip_address,
        status: status.parse().unwrap_or(AuditStatus::Unknown(status)),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn chair() -> InventoryRecord {
        InventoryRecord {
            id: "1".into(),
            name: "Chair".into(),
            category: "Office".into(),
            quantity: 5,
            unit: "pcs".into(),
            location: "Room 1".into(),
            condition: "Used".into(),
            date_acquired: "01/01/24".into(),
        }
    }

    #[test]
    fn encodes_plain_record_without_quotes() {
        assert_eq!(
            encode_record(&chair()),
            "1,Chair,Office,5,pcs,Room 1,Used,01/01/24"
        );
    }

    #[test]
    fn quotes_only_fields_with_commas() {
        let mut record = chair();
        record.name = "Chair, folding".into();
        let line = encode_record(&record);
        assert_eq!(line, "1,\"Chair, folding\",Office,5,pcs,Room 1,Used,01/01/24");
        assert_eq!(decode_record(&line).unwrap(), record);
    }

    #[test]
    fn record_round_trips() {
        let record = chair();
        assert_eq!(decode_record(&encode_record(&record)).unwrap(), record);
    }

    #[test]
    fn inventory_quotes_only_toggle() {
        let line = "1,\"a\"\"b\",Office,5,pcs,Room 1,Used,01/01/24";
        assert_eq!(decode_record(line).unwrap().name, "ab");
        assert_eq!(split_quoted_fields("\"a\"\"b\"")[0], "a\"b");
    }

    #[test]
    fn lossy_lines_replaces_invalid_bytes() {
        let input: &[u8] = b"Caf\xe9 table\r\nplain\nlast";
        let lines: Vec<String> = lossy_lines(input).map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["Caf\u{FFFD} table", "plain", "last"]);
    }

    #[test]
    fn short_line_is_malformed() {
        let err = decode_record("1,Chair,Office,5").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns {
                expected: 8,
                found: 4
            }
        );
    }

    #[test]
    fn bad_quantity_defaults_to_zero() {
        let record = decode_record("1,Chair,Office,lots,pcs,Room 1,Used,01/01/24").unwrap();
        assert_eq!(record.quantity, 0);
        assert_eq!(record.unit, "pcs");

        let record = decode_record("1,Chair,Office,,pcs,Room 1,Used,01/01/24").unwrap();
        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let record = decode_record("1,Chair,Office,5,pcs,Room 1,Used,01/01/24,extra").unwrap();
        assert_eq!(record, chair());
    }

    #[test]
    fn audit_fields_are_always_quoted() {
        let entry = AuditEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9).and_then(|d| d.and_hms_opt(8, 5, 0)),
            raw_timestamp: String::new(),
            username: "ana".into(),
            action: AuditAction::AddItem,
            ip_address: "127.0.0.1".into(),
            status: AuditStatus::Success,
            details: "Name=\"Desk\"\nsecond line".into(),
        };
        let line = encode_audit(&entry);
        assert_eq!(
            line,
            "\"2024-03-09 08:05:00\",\"ana\",\"ADD_ITEM\",\"127.0.0.1\",\"SUCCESS\",\"Name=\"\"Desk\"\" second line\""
        );

        let decoded = decode_audit(&line);
        assert_eq!(decoded.timestamp, entry.timestamp);
        assert_eq!(decoded.details, "Name=\"Desk\" second line");
        assert_eq!(decoded.action, AuditAction::AddItem);
    }

    #[test]
    fn short_audit_line_is_partially_populated() {
        let entry = decode_audit("\"garbage\",\"bob\"");
        assert_eq!(entry.timestamp, None);
        assert_eq!(entry.raw_timestamp, "garbage");
        assert_eq!(entry.username, "bob");
        assert_eq!(entry.ip_address, "");
        assert_eq!(entry.details, "");
        assert_eq!(entry.status, AuditStatus::Unknown(String::new()));
    }
}
