//! # Floor
//!
//! The entity store for one point-of-sale instance: the catalog, the tables and every
//! order ever placed. `Floor` is plain owned data with no interior mutability; the
//! [`store`](crate::store) actor owns exactly one and applies both user actions and
//! automation ticks to it, one at a time.
//!
//! ## Invariants
//!
//! - A table is `Occupied` exactly when it has a `current_order_id`, and that order
//!   is active and sits at that table.
//! - Orders only move forward through their lifecycle; none is ever removed.
//!
//! Every mutating method either upholds these or returns a [`FloorError`] without
//! touching anything. [`Floor::audit`] re-checks them from scratch.

pub mod error;
pub mod sample;

pub use error::*;

use crate::model::{
    CatalogItem, CatalogItemCreate, CatalogItemId, CatalogItemUpdate, Money, Order, OrderId,
    OrderLine, OrderStatus, PaymentMethod, PaymentStatus, Table, TableId, TableStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FloorRecord")]
pub struct Floor {
    catalog: Vec<CatalogItem>,
    tables: Vec<Table>,
    orders: Vec<Order>,
    last_item_id: u32,
    last_table_id: u32,
    last_order_id: u32,
}

/// Wire shape of [`Floor`]. Loading one goes through [`Floor::audit`].
#[derive(Deserialize)]
struct FloorRecord {
    catalog: Vec<CatalogItem>,
    tables: Vec<Table>,
    orders: Vec<Order>,
    last_item_id: u32,
    last_table_id: u32,
    last_order_id: u32,
}

impl TryFrom<FloorRecord> for Floor {
    type Error = FloorError;

    fn try_from(record: FloorRecord) -> Result<Self, Self::Error> {
        let floor = Floor {
            catalog: record.catalog,
            tables: record.tables,
            orders: record.orders,
            last_item_id: record.last_item_id,
            last_table_id: record.last_table_id,
            last_order_id: record.last_order_id,
        };
        let max_item = floor.catalog.iter().map(|i| i.id.0).max().unwrap_or(0);
        let max_table = floor.tables.iter().map(|t| t.id.0).max().unwrap_or(0);
        let max_order = floor.orders.iter().map(|o| o.id.0).max().unwrap_or(0);
        if max_item > floor.last_item_id
            || max_table > floor.last_table_id
            || max_order > floor.last_order_id
        {
            return Err(FloorError::Inconsistent(
                "id counters are behind stored ids".to_string(),
            ));
        }
        for order in &floor.orders {
            if Order::total_of(&order.lines)? != order.total {
                return Err(FloorError::Inconsistent(format!(
                    "{} total {} does not match its lines",
                    order.id, order.total
                )));
            }
        }
        floor.audit()?;
        Ok(floor)
    }
}

/// Headline counters for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorStats {
    /// Orders neither completed nor cancelled.
    pub active_orders: usize,
    pub occupied_tables: usize,
    pub available_tables: usize,
    /// Orders paid with a completion date of `today`.
    pub paid_today: usize,
    pub revenue_today: Money,
}

impl Floor {
    /// An empty floor.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Reads ---

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn catalog_item(&self, id: CatalogItemId) -> Option<&CatalogItem> {
        self.catalog.iter().find(|item| item.id == id)
    }

    pub fn available_items(&self) -> Vec<&CatalogItem> {
        self.catalog.iter().filter(|item| item.available).collect()
    }

    pub fn available_tables(&self) -> Vec<TableId> {
        self.tables
            .iter()
            .filter(|t| t.is_available())
            .map(|t| t.id)
            .collect()
    }

    pub fn orders_in(&self, status: OrderStatus) -> Vec<OrderId> {
        self.orders
            .iter()
            .filter(|o| o.status == status)
            .map(|o| o.id)
            .collect()
    }

    /// Served orders still waiting for payment.
    pub fn settleable_orders(&self) -> Vec<OrderId> {
        self.orders
            .iter()
            .filter(|o| o.is_settleable())
            .map(|o| o.id)
            .collect()
    }

    /// The number staff see for `table`, or 0 when the table is unknown.
    pub fn table_number(&self, table: TableId) -> u32 {
        self.table(table).map(|t| t.number).unwrap_or(0)
    }

    /// `"Table 7"` for log lines; falls back to the raw id for unknown tables.
    pub fn table_label(&self, table: TableId) -> String {
        match self.table(table) {
            Some(t) => format!("Table {}", t.number),
            None => table.to_string(),
        }
    }

    pub fn stats(&self, today: NaiveDate) -> FloorStats {
        let paid_today: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Paid)
            .filter(|o| o.completed_at.is_some_and(|at| at.date_naive() == today))
            .collect();
        FloorStats {
            active_orders: self.orders.iter().filter(|o| o.is_active()).count(),
            occupied_tables: self
                .tables
                .iter()
                .filter(|t| t.status() == TableStatus::Occupied)
                .count(),
            available_tables: self.tables.iter().filter(|t| t.is_available()).count(),
            paid_today: paid_today.len(),
            revenue_today: paid_today.iter().map(|o| o.total).sum(),
        }
    }

    // --- Catalog ---

    pub fn add_catalog_item(
        &mut self,
        params: CatalogItemCreate,
    ) -> Result<CatalogItemId, FloorError> {
        if params.price.is_negative() {
            return Err(FloorError::NegativePrice(params.price));
        }
        Ok(self.insert_catalog_item(params))
    }

    fn insert_catalog_item(&mut self, params: CatalogItemCreate) -> CatalogItemId {
        self.last_item_id += 1;
        let id = CatalogItemId(self.last_item_id);
        self.catalog.push(CatalogItem::from_create(id, params));
        debug!(%id, size = self.catalog.len(), "Catalog item added");
        id
    }

    pub fn update_catalog_item(
        &mut self,
        id: CatalogItemId,
        update: CatalogItemUpdate,
    ) -> Result<CatalogItem, FloorError> {
        if let Some(price) = update.price.filter(|p| p.is_negative()) {
            return Err(FloorError::NegativePrice(price));
        }
        let item = self
            .catalog
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(FloorError::UnknownItem(id))?;
        item.apply(update);
        Ok(item.clone())
    }

    /// Removes an item from the catalog. Orders that already contain it keep their lines.
    pub fn remove_catalog_item(&mut self, id: CatalogItemId) -> Result<CatalogItem, FloorError> {
        let index = self
            .catalog
            .iter()
            .position(|item| item.id == id)
            .ok_or(FloorError::UnknownItem(id))?;
        Ok(self.catalog.remove(index))
    }

    // --- Tables ---

    pub fn add_table(&mut self, number: u32, capacity: u32) -> TableId {
        self.last_table_id += 1;
        let id = TableId(self.last_table_id);
        self.tables.push(Table::new(id, number, capacity));
        id
    }

    /// Takes an unoccupied table out of service (`on = true`) or puts it back.
    pub fn set_maintenance(&mut self, id: TableId, on: bool) -> Result<TableStatus, FloorError> {
        let table = self.table_mut(id)?;
        if table.status() == TableStatus::Occupied {
            return Err(FloorError::TableOccupied(id));
        }
        table.set_maintenance(on);
        Ok(table.status())
    }

    // --- Orders ---

    /// Places an order from `(item, quantity)` picks, as a cashier would.
    ///
    /// Picks of the same item are merged into one line.
    pub fn place_order(
        &mut self,
        table: TableId,
        picks: &[(CatalogItemId, u32)],
        now: DateTime<Utc>,
    ) -> Result<OrderId, FloorError> {
        let lines = self.lines_for(picks)?;
        self.open_order(table, lines, now)
    }

    /// Replaces the lines of an open, unpaid order and recomputes its total.
    ///
    /// The order keeps its id, status, table and creation time.
    pub fn amend_order(
        &mut self,
        id: OrderId,
        picks: &[(CatalogItemId, u32)],
    ) -> Result<&Order, FloorError> {
        let lines = self.lines_for(picks)?;
        if lines.is_empty() {
            return Err(FloorError::EmptyOrder);
        }
        let order = self.order_mut(id)?;
        if order.status.is_terminal() || order.payment_status == PaymentStatus::Paid {
            return Err(FloorError::InvalidTransition {
                order: id,
                from: order.status,
                action: "amend",
            });
        }
        order.replace_lines(lines)?;
        info!(order = %id, total = %order.total, "Order amended");
        Ok(order)
    }

    /// Opens a pending order on an available table and occupies the table.
    pub fn open_order(
        &mut self,
        table: TableId,
        lines: Vec<OrderLine>,
        now: DateTime<Utc>,
    ) -> Result<OrderId, FloorError> {
        if lines.is_empty() {
            return Err(FloorError::EmptyOrder);
        }
        if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
            return Err(FloorError::InvalidQuantity {
                item: line.item_ref,
                quantity: 0,
            });
        }
        let status = self.table_mut(table)?.status();
        if status != TableStatus::Available {
            return Err(FloorError::TableNotAvailable { table, status });
        }

        let id = OrderId(self.last_order_id + 1);
        let order = Order::new(id, table, lines, now)?;
        info!(order = %id, table = %self.table_label(table), total = %order.total, "Order opened");
        self.last_order_id = id.0;
        self.orders.push(order);
        self.table_mut(table)?.occupy(id);
        Ok(id)
    }

    /// Moves an order one kitchen stage forward (`pending`, `preparing`, `ready`).
    ///
    /// Served orders leave through [`Floor::settle_order`], terminal ones not at all.
    pub fn advance_order(&mut self, id: OrderId) -> Result<OrderStatus, FloorError> {
        let order = self.order_mut(id)?;
        let next = OrderStatus::KITCHEN_STAGES
            .iter()
            .find(|(from, _)| *from == order.status)
            .map(|&(_, to)| to)
            .ok_or(FloorError::InvalidTransition {
                order: id,
                from: order.status,
                action: "advance",
            })?;
        debug!(order = %id, from = %order.status, to = %next, "Order advanced");
        order.status = next;
        Ok(next)
    }

    /// Takes payment for a served order, completes it and frees its table.
    pub fn settle_order(
        &mut self,
        id: OrderId,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Order, FloorError> {
        let order = self.order_mut(id)?;
        if !order.is_settleable() {
            return Err(FloorError::NotSettleable {
                order: id,
                status: order.status,
                payment: order.payment_status,
            });
        }
        order.payment_status = PaymentStatus::Paid;
        order.payment_method = Some(method);
        order.status = OrderStatus::Completed;
        order.completed_at = Some(now);
        let settled = order.clone();

        self.release_table(settled.table_id, id);
        info!(order = %id, table = %settled.table_id, %method, amount = %settled.total, "Order settled");
        Ok(settled)
    }

    /// Cancels a non-terminal order and frees its table.
    pub fn cancel_order(&mut self, id: OrderId) -> Result<(), FloorError> {
        let order = self.order_mut(id)?;
        if order.status.is_terminal() {
            return Err(FloorError::InvalidTransition {
                order: id,
                from: order.status,
                action: "cancel",
            });
        }
        order.status = OrderStatus::Cancelled;
        let table = order.table_id;

        self.release_table(table, id);
        info!(order = %id, %table, "Order cancelled");
        Ok(())
    }

    /// Checks the table/order invariants from scratch.
    pub fn audit(&self) -> Result<(), FloorError> {
        for table in &self.tables {
            match (table.status(), table.current_order_id()) {
                (TableStatus::Occupied, Some(order_id)) => {
                    let order = self.order(order_id).ok_or_else(|| {
                        FloorError::Inconsistent(format!(
                            "{} holds missing {}",
                            table.id, order_id
                        ))
                    })?;
                    if order.table_id != table.id || !order.is_active() {
                        return Err(FloorError::Inconsistent(format!(
                            "{} holds {} which is {} at {}",
                            table.id, order_id, order.status, order.table_id
                        )));
                    }
                }
                (TableStatus::Occupied, None) => {
                    return Err(FloorError::Inconsistent(format!(
                        "{} is occupied without an order",
                        table.id
                    )));
                }
                (status, Some(order_id)) => {
                    return Err(FloorError::Inconsistent(format!(
                        "{} is {} but holds {}",
                        table.id, status, order_id
                    )));
                }
                (_, None) => {}
            }
        }
        Ok(())
    }

    /// Validates cashier picks against the catalog and merges them into lines.
    fn lines_for(&self, picks: &[(CatalogItemId, u32)]) -> Result<Vec<OrderLine>, FloorError> {
        let mut lines = Vec::new();
        for &(item_id, quantity) in picks {
            if quantity == 0 {
                return Err(FloorError::InvalidQuantity {
                    item: item_id,
                    quantity,
                });
            }
            let item = self
                .catalog_item(item_id)
                .ok_or(FloorError::UnknownItem(item_id))?;
            if !item.available {
                return Err(FloorError::ItemUnavailable(item_id));
            }
            OrderLine::merge_into(&mut lines, item, quantity)?;
        }
        Ok(lines)
    }

    fn table_mut(&mut self, id: TableId) -> Result<&mut Table, FloorError> {
        self.tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(FloorError::UnknownTable(id))
    }

    fn order_mut(&mut self, id: OrderId) -> Result<&mut Order, FloorError> {
        self.orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(FloorError::UnknownOrder(id))
    }

    /// Frees `table` if it is currently holding `order`.
    fn release_table(&mut self, table: TableId, order: OrderId) {
        if let Some(t) = self
            .tables
            .iter_mut()
            .find(|t| t.id == table && t.current_order_id() == Some(order))
        {
            t.release();
        }
    }
}
