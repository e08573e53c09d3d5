//! Error types for floor operations.

use crate::model::{
    AmountOverflow, CatalogItemId, Money, OrderId, OrderStatus, PaymentStatus, TableId,
    TableStatus,
};
use thiserror::Error;

/// Errors that can occur while mutating the floor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FloorError {
    #[error("Table not found: {0}")]
    UnknownTable(TableId),

    #[error("Order not found: {0}")]
    UnknownOrder(OrderId),

    #[error("Catalog item not found: {0}")]
    UnknownItem(CatalogItemId),

    /// The table cannot take a new order in its current status.
    #[error("Table {table} is {status}, not available")]
    TableNotAvailable { table: TableId, status: TableStatus },

    /// The table holds an order and cannot change status.
    #[error("Table {0} is occupied")]
    TableOccupied(TableId),

    #[error("Catalog item {0} is not available")]
    ItemUnavailable(CatalogItemId),

    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Invalid quantity {quantity} for {item}")]
    InvalidQuantity { item: CatalogItemId, quantity: u32 },

    #[error("Price cannot be negative: {0}")]
    NegativePrice(Money),

    /// The requested step is not a forward move from the order's current status.
    #[error("Cannot {action} order {order} while {from}")]
    InvalidTransition {
        order: OrderId,
        from: OrderStatus,
        action: &'static str,
    },

    /// Only served, unpaid orders can be paid.
    #[error("Order {order} cannot be settled ({status}, {payment})")]
    NotSettleable {
        order: OrderId,
        status: OrderStatus,
        payment: PaymentStatus,
    },

    /// A line quantity or order total does not fit.
    #[error("Order amount out of range")]
    Overflow(#[from] AmountOverflow),

    /// A table/order pairing is out of sync.
    #[error("Floor inconsistent: {0}")]
    Inconsistent(String),
}
