/// Represents a table on the restaurant floor.
///
/// A table holds at most one active order. The pair (`status`, `current_order_id`)
/// is only ever changed through [`Table::occupy`] and [`Table::release`], which keep
/// `status == Occupied` and `current_order_id.is_some()` in lockstep.
use crate::model::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Type-safe identifier for Tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u32);

impl From<u32> for TableId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Maintenance,
}

impl Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Maintenance => "maintenance",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRecord")]
pub struct Table {
    pub id: TableId,
    /// Number shown to staff and used in activity log lines.
    pub number: u32,
    pub capacity: u32,
    status: TableStatus,
    current_order_id: Option<OrderId>,
}

/// A stored table whose status and order disagree.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{table} is {status} with order {order:?}")]
pub struct TableMismatch {
    pub table: TableId,
    pub status: TableStatus,
    pub order: Option<OrderId>,
}

/// Wire shape of [`Table`], checked on the way in.
#[derive(Deserialize)]
struct TableRecord {
    id: TableId,
    number: u32,
    capacity: u32,
    status: TableStatus,
    current_order_id: Option<OrderId>,
}

impl TryFrom<TableRecord> for Table {
    type Error = TableMismatch;

    fn try_from(record: TableRecord) -> Result<Self, Self::Error> {
        let occupied = record.status == TableStatus::Occupied;
        if occupied != record.current_order_id.is_some() {
            return Err(TableMismatch {
                table: record.id,
                status: record.status,
                order: record.current_order_id,
            });
        }
        Ok(Self {
            id: record.id,
            number: record.number,
            capacity: record.capacity,
            status: record.status,
            current_order_id: record.current_order_id,
        })
    }
}

impl Table {
    /// Creates an available table.
    pub fn new(id: TableId, number: u32, capacity: u32) -> Self {
        Self {
            id,
            number,
            capacity,
            status: TableStatus::Available,
            current_order_id: None,
        }
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    pub fn current_order_id(&self) -> Option<OrderId> {
        self.current_order_id
    }

    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available
    }

    pub(crate) fn occupy(&mut self, order: OrderId) {
        self.status = TableStatus::Occupied;
        self.current_order_id = Some(order);
    }

    pub(crate) fn release(&mut self) {
        self.status = TableStatus::Available;
        self.current_order_id = None;
    }

    pub(crate) fn set_maintenance(&mut self, on: bool) {
        self.status = if on {
            TableStatus::Maintenance
        } else {
            TableStatus::Available
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_status_and_order_in_lockstep() {
        let mut table = Table::new(TableId(1), 4, 2);
        table.occupy(OrderId(9));
        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        let orphan = r#"{"id":1,"number":4,"capacity":2,"status":"occupied","current_order_id":null}"#;
        let err = serde_json::from_str::<Table>(orphan).unwrap_err();
        assert!(err.to_string().contains("table-1 is occupied"));

        let stale = r#"{"id":1,"number":4,"capacity":2,"status":"available","current_order_id":9}"#;
        assert!(serde_json::from_str::<Table>(stale).is_err());
    }
}
