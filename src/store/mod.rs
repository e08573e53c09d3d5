//! # POS Store
//!
//! [`PosStore`] is the single owner of a floor, its activity log and the driver
//! settings. It lives inside a [`StateActor`], so automation ticks and cashier
//! actions arrive through the same mailbox and each runs to completion before the
//! next one starts.
//!
//! The actor's context is the random source used by the driver. Injecting it at
//! `run()` time lets tests and the demo pick a seed.

pub mod error;

pub use error::*;

use crate::activity_log::ActivityLog;
use crate::automation::{Automation, TickReport};
use crate::clients::PosClient;
use crate::floor::{Floor, FloorStats};
use crate::model::{
    CatalogItem, CatalogItemCreate, CatalogItemId, CatalogItemUpdate, Order, OrderId,
    OrderStatus, PaymentMethod, TableId, TableStatus,
};
use chrono::Utc;
use rand::rngs::StdRng;
use serde::Serialize;
use tick_actor::{ActorState, StateActor};
use tracing::{debug, info};

#[derive(Debug)]
pub enum PosCommand {
    /// One pass of the activity driver.
    Tick,
    PlaceOrder {
        table: TableId,
        picks: Vec<(CatalogItemId, u32)>,
    },
    /// Replaces the lines of an open order.
    AmendOrder {
        order: OrderId,
        picks: Vec<(CatalogItemId, u32)>,
    },
    AdvanceOrder(OrderId),
    SettleOrder {
        order: OrderId,
        method: PaymentMethod,
    },
    CancelOrder(OrderId),
    AddCatalogItem(CatalogItemCreate),
    UpdateCatalogItem {
        id: CatalogItemId,
        update: CatalogItemUpdate,
    },
    RemoveCatalogItem(CatalogItemId),
    AddTable {
        number: u32,
        capacity: u32,
    },
    SetMaintenance {
        table: TableId,
        on: bool,
    },
    SetAutoSettle(bool),
    /// Appends a free-form line to the activity log.
    Note(String),
    ClearLog,
    Stats,
}

impl PosCommand {
    /// Short name used in errors and spans.
    pub fn name(&self) -> &'static str {
        match self {
            PosCommand::Tick => "tick",
            PosCommand::PlaceOrder { .. } => "place_order",
            PosCommand::AmendOrder { .. } => "amend_order",
            PosCommand::AdvanceOrder(_) => "advance_order",
            PosCommand::SettleOrder { .. } => "settle_order",
            PosCommand::CancelOrder(_) => "cancel_order",
            PosCommand::AddCatalogItem(_) => "add_catalog_item",
            PosCommand::UpdateCatalogItem { .. } => "update_catalog_item",
            PosCommand::RemoveCatalogItem(_) => "remove_catalog_item",
            PosCommand::AddTable { .. } => "add_table",
            PosCommand::SetMaintenance { .. } => "set_maintenance",
            PosCommand::SetAutoSettle(_) => "set_auto_settle",
            PosCommand::Note(_) => "note",
            PosCommand::ClearLog => "clear_log",
            PosCommand::Stats => "stats",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PosReply {
    Ticked(TickReport),
    OrderPlaced(OrderId),
    Status(OrderStatus),
    Amended(Order),
    Settled(Order),
    ItemAdded(CatalogItemId),
    Item(CatalogItem),
    TableAdded(TableId),
    Table(TableStatus),
    Stats(FloorStats),
    Done,
}

/// Read model handed out by snapshot requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosSnapshot {
    pub floor: Floor,
    pub log: ActivityLog,
    /// Driver ticks handled so far.
    pub ticks: u64,
    pub auto_settle: bool,
}

#[derive(Debug)]
pub struct PosStore {
    floor: Floor,
    log: ActivityLog,
    automation: Automation,
    ticks: u64,
}

impl PosStore {
    pub fn new(floor: Floor, automation: Automation) -> Self {
        let log = ActivityLog::with_capacity(automation.config().log_capacity);
        Self {
            floor,
            log,
            automation,
            ticks: 0,
        }
    }

    fn tick(&mut self, rng: &mut StdRng) -> TickReport {
        let now = Utc::now();
        let report = self.automation.tick(&mut self.floor, rng, now);
        for activity in &report.activities {
            self.log.push(now, activity.to_string());
        }
        self.ticks += 1;
        debug!(tick = self.ticks, actions = report.activities.len(), "Tick applied");
        report
    }
}

impl ActorState for PosStore {
    type Command = PosCommand;
    type Reply = PosReply;
    type Snapshot = PosSnapshot;
    type Context = StdRng;
    type Error = PosError;

    fn handle(&mut self, command: PosCommand, rng: &mut StdRng) -> Result<PosReply, PosError> {
        let floor = &mut self.floor;
        let reply = match command {
            PosCommand::Tick => PosReply::Ticked(self.tick(rng)),
            PosCommand::PlaceOrder { table, picks } => {
                PosReply::OrderPlaced(floor.place_order(table, &picks, Utc::now())?)
            }
            PosCommand::AmendOrder { order, picks } => {
                PosReply::Amended(floor.amend_order(order, &picks)?.clone())
            }
            PosCommand::AdvanceOrder(id) => PosReply::Status(floor.advance_order(id)?),
            PosCommand::SettleOrder { order, method } => {
                PosReply::Settled(floor.settle_order(order, method, Utc::now())?)
            }
            PosCommand::CancelOrder(id) => {
                floor.cancel_order(id)?;
                PosReply::Done
            }
            PosCommand::AddCatalogItem(params) => {
                PosReply::ItemAdded(floor.add_catalog_item(params)?)
            }
            PosCommand::UpdateCatalogItem { id, update } => {
                PosReply::Item(floor.update_catalog_item(id, update)?)
            }
            PosCommand::RemoveCatalogItem(id) => PosReply::Item(floor.remove_catalog_item(id)?),
            PosCommand::AddTable { number, capacity } => {
                PosReply::TableAdded(floor.add_table(number, capacity))
            }
            PosCommand::SetMaintenance { table, on } => {
                PosReply::Table(floor.set_maintenance(table, on)?)
            }
            PosCommand::SetAutoSettle(on) => {
                self.automation.set_auto_settle(on);
                info!(auto_settle = on, "Auto-settle toggled");
                PosReply::Done
            }
            PosCommand::Note(message) => {
                self.log.push(Utc::now(), message);
                PosReply::Done
            }
            PosCommand::ClearLog => {
                self.log.clear();
                PosReply::Done
            }
            PosCommand::Stats => PosReply::Stats(floor.stats(Utc::now().date_naive())),
        };
        Ok(reply)
    }

    fn snapshot(&self) -> PosSnapshot {
        PosSnapshot {
            floor: self.floor.clone(),
            log: self.log.clone(),
            ticks: self.ticks,
            auto_settle: self.automation.auto_settle(),
        }
    }

    fn on_start(&mut self, _rng: &mut StdRng) {
        info!(
            tables = self.floor.tables().len(),
            items = self.floor.catalog().len(),
            "POS store online"
        );
    }

    fn on_stop(&mut self, _rng: &mut StdRng) {
        info!(
            ticks = self.ticks,
            orders = self.floor.orders().len(),
            "POS store closed"
        );
    }
}

/// Creates a store actor and its client.
pub fn new(
    floor: Floor,
    automation: Automation,
    buffer_size: usize,
) -> (StateActor<PosStore>, PosClient) {
    let (actor, generic_client) = StateActor::new(PosStore::new(floor, automation), buffer_size);
    (actor, PosClient::new(generic_client))
}
