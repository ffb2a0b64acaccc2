use crate::model::InventoryRecord;
use std::fmt;
use std::str::FromStr;

/// A 1-based row number, as shown next to each record.
///
/// Positions always refer to the unfiltered store order, so a row found by
/// search keeps the number it has in the full listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(usize);

impl Position {
    pub fn new(n: usize) -> Option<Self> {
        (n > 0).then_some(Position(n))
    }

    pub fn from_index(index: usize) -> Self {
        Position(index + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn to_index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .ok()
            .and_then(Position::new)
            .ok_or_else(|| format!("Invalid position: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub record: InventoryRecord,
    pub position: Position,
}

/// Pairs each record with its position in store order.
pub fn index_records(records: &[InventoryRecord]) -> Vec<DisplayRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            record: record.clone(),
            position: Position::from_index(i),
        })
        .collect()
}
