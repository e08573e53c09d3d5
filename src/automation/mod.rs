//! # Activity Driver
//!
//! Simulates a busy dining room. Each call to [`Automation::tick`] may:
//!
//! 1. **Spawn** one order on a random available table,
//! 2. **Advance** one random order per kitchen stage
//!    (`pending -> preparing`, `preparing -> ready`, `ready -> served`),
//! 3. **Settle** one random served, unpaid order and free its table.
//!
//! Every step is gated by its own probability from [`AutomationConfig`] and is
//! silently skipped when nothing is eligible. Eligibility for steps 2 and 3 is
//! decided from the floor as it was when the tick began, so an order moves at most
//! one stage per tick and a freshly spawned order is never advanced in the same tick.
//!
//! The driver only moves orders forward and never cancels. The random source is
//! injected, so a seeded `StdRng` makes a run fully reproducible.

pub mod config;

pub use config::*;

use crate::floor::{Floor, FloorError};
use crate::model::{Money, OrderId, OrderLine, OrderStatus, PaymentMethod};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, warn};

/// One mutation performed by the driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Activity {
    Spawned {
        order: OrderId,
        table_number: u32,
        item_count: u32,
        total: Money,
    },
    Advanced {
        order: OrderId,
        table_number: u32,
        to: OrderStatus,
    },
    Settled {
        order: OrderId,
        table_number: u32,
        method: PaymentMethod,
        amount: Money,
    },
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Spawned {
                table_number,
                item_count,
                total,
                ..
            } => write!(
                f,
                "New order - Table {} ({} items, ${})",
                table_number, item_count, total
            ),
            Activity::Advanced {
                table_number, to, ..
            } => match to {
                OrderStatus::Preparing => write!(f, "Order for Table {} is being prepared", table_number),
                OrderStatus::Ready => write!(f, "Order for Table {} is ready to serve", table_number),
                OrderStatus::Served => write!(f, "Order for Table {} served", table_number),
                other => write!(f, "Order for Table {} is {}", table_number, other),
            },
            Activity::Settled {
                table_number,
                method,
                amount,
                ..
            } => write!(
                f,
                "Table {} paid ({}) - ${} - table released",
                table_number, method, amount
            ),
        }
    }
}

/// What one tick did, in the order it happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub activities: Vec<Activity>,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.activities.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Automation {
    config: AutomationConfig,
}

impl Automation {
    pub fn new(config: AutomationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    pub fn auto_settle(&self) -> bool {
        self.config.auto_settle
    }

    pub fn set_auto_settle(&mut self, on: bool) {
        self.config.auto_settle = on;
    }

    /// Runs one simulation step against `floor`.
    pub fn tick<R: Rng + ?Sized>(
        &self,
        floor: &mut Floor,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> TickReport {
        let stages: Vec<(OrderStatus, Vec<OrderId>)> = OrderStatus::KITCHEN_STAGES
            .iter()
            .map(|&(from, _)| (from, floor.orders_in(from)))
            .collect();
        let settleable = floor.settleable_orders();

        let mut report = TickReport::default();
        let mut record = |step: Result<Option<Activity>, FloorError>| match step {
            Ok(Some(activity)) => {
                debug!(%activity, "Automation step");
                report.activities.push(activity);
            }
            Ok(None) => {}
            // Only reachable if the floor was mutated between the snapshot and the step.
            Err(e) => warn!(error = %e, "Automation step skipped"),
        };

        record(self.spawn(floor, rng, now));
        for (from, candidates) in &stages {
            record(self.advance(floor, rng, *from, candidates));
        }
        if self.config.auto_settle {
            record(self.settle(floor, rng, &settleable, now));
        }
        report
    }

    fn spawn<R: Rng + ?Sized>(
        &self,
        floor: &mut Floor,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Option<Activity>, FloorError> {
        let tables = floor.available_tables();
        if tables.is_empty() || !rng.gen_bool(self.config.spawn_chance) {
            return Ok(None);
        }
        let Some(&table) = tables.choose(rng) else {
            return Ok(None);
        };

        let menu = floor.available_items();
        if menu.is_empty() {
            return Ok(None);
        }
        let picks = rng.gen_range(1..=self.config.max_items_per_order);
        let mut lines = Vec::new();
        for _ in 0..picks {
            if let Some(item) = menu.choose(rng) {
                OrderLine::merge_into(&mut lines, item, 1)?;
            }
        }

        let order_id = floor.open_order(table, lines, now)?;
        let total = floor.order(order_id).map(|o| o.total).unwrap_or_default();
        Ok(Some(Activity::Spawned {
            order: order_id,
            table_number: floor.table_number(table),
            item_count: picks,
            total,
        }))
    }

    fn advance<R: Rng + ?Sized>(
        &self,
        floor: &mut Floor,
        rng: &mut R,
        from: OrderStatus,
        candidates: &[OrderId],
    ) -> Result<Option<Activity>, FloorError> {
        if candidates.is_empty() || !rng.gen_bool(self.config.advance_chance) {
            return Ok(None);
        }
        let Some(&order_id) = candidates.choose(rng) else {
            return Ok(None);
        };
        let to = floor.advance_order(order_id)?;
        debug!(order = %order_id, %from, %to, "Driver advanced order");
        let table_number = floor
            .order(order_id)
            .map(|o| floor.table_number(o.table_id))
            .unwrap_or(0);
        Ok(Some(Activity::Advanced {
            order: order_id,
            table_number,
            to,
        }))
    }

    fn settle<R: Rng + ?Sized>(
        &self,
        floor: &mut Floor,
        rng: &mut R,
        candidates: &[OrderId],
        now: DateTime<Utc>,
    ) -> Result<Option<Activity>, FloorError> {
        if candidates.is_empty() || !rng.gen_bool(self.config.settle_chance) {
            return Ok(None);
        }
        let Some(&order_id) = candidates.choose(rng) else {
            return Ok(None);
        };
        let method = PaymentMethod::ALL
            .choose(rng)
            .copied()
            .unwrap_or(PaymentMethod::Cash);
        let settled = floor.settle_order(order_id, method, now)?;
        Ok(Some(Activity::Settled {
            order: order_id,
            table_number: floor.table_number(settled.table_id),
            method,
            amount: settled.total,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogItemCreate, PaymentStatus, TableStatus};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always() -> Automation {
        Automation::new(
            AutomationConfig::default()
                .with_chances(1.0, 1.0, 1.0)
                .with_max_items_per_order(1),
        )
        .unwrap()
    }

    fn one_table_one_item() -> Floor {
        let mut floor = Floor::new();
        floor
            .add_catalog_item(CatalogItemCreate::new("Plate", Money::from_cents(1000), "Mains"))
            .unwrap();
        floor.add_table(4, 2);
        floor
    }

    #[test]
    fn test_spawn_single_pick_order() {
        let mut floor = one_table_one_item();
        let mut rng = StdRng::seed_from_u64(1);

        let report = always().tick(&mut floor, &mut rng, Utc::now());

        assert_eq!(floor.orders().len(), 1);
        let order = &floor.orders()[0];
        assert_eq!(order.total, Money::from_cents(1000));
        assert_eq!(order.status, OrderStatus::Pending);
        let table = &floor.tables()[0];
        assert_eq!(table.status(), TableStatus::Occupied);
        assert_eq!(table.current_order_id(), Some(order.id));

        // The new order was not eligible for advancing in the same tick.
        assert_eq!(report.activities.len(), 1);
        assert_eq!(
            report.activities[0].to_string(),
            "New order - Table 4 (1 items, $10.00)"
        );
    }

    #[test]
    fn test_order_moves_one_stage_per_tick_then_settles() {
        let mut floor = one_table_one_item();
        let mut rng = StdRng::seed_from_u64(2);
        let automation = always();

        automation.tick(&mut floor, &mut rng, Utc::now());
        let order_id = floor.orders()[0].id;
        let mut seen = vec![floor.orders()[0].status];
        for _ in 0..3 {
            automation.tick(&mut floor, &mut rng, Utc::now());
            seen.push(floor.order(order_id).unwrap().status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
            ]
        );

        let report = automation.tick(&mut floor, &mut rng, Utc::now());
        let order = floor.order(order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert!(order.payment_method.is_some());

        let line = report
            .activities
            .iter()
            .find(|a| matches!(a, Activity::Settled { .. }))
            .unwrap()
            .to_string();
        assert!(line.contains("Table 4"), "{}", line);
        assert!(line.contains("$10.00"), "{}", line);
        // Spawn ran before the settle freed the table, so no new order this tick.
        assert_eq!(floor.orders().len(), 1);
        assert!(floor.audit().is_ok());
    }

    #[test]
    fn test_zero_chances_leave_floor_untouched() {
        let mut floor = Floor::sample();
        let mut rng = StdRng::seed_from_u64(3);
        let automation =
            Automation::new(AutomationConfig::default().with_chances(0.0, 0.0, 0.0)).unwrap();

        for _ in 0..20 {
            assert!(automation.tick(&mut floor, &mut rng, Utc::now()).is_idle());
        }
        assert!(floor.orders().is_empty());
    }

    #[test]
    fn test_auto_settle_off_keeps_served_orders() {
        let mut floor = one_table_one_item();
        let mut rng = StdRng::seed_from_u64(4);
        let mut automation = always();
        automation.set_auto_settle(false);

        for _ in 0..10 {
            automation.tick(&mut floor, &mut rng, Utc::now());
        }
        assert_eq!(floor.orders().len(), 1);
        assert_eq!(floor.orders()[0].status, OrderStatus::Served);
        assert_eq!(floor.orders()[0].payment_status, PaymentStatus::Unpaid);
        assert_eq!(floor.tables()[0].status(), TableStatus::Occupied);
    }

    #[test]
    fn test_no_menu_means_no_spawn() {
        let mut floor = Floor::new();
        floor.add_table(1, 4);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(always().tick(&mut floor, &mut rng, Utc::now()).is_idle());
        assert!(floor.tables()[0].is_available());
    }

    #[test]
    fn test_long_run_keeps_invariants() {
        let mut floor = Floor::sample();
        let mut rng = StdRng::seed_from_u64(42);
        let automation = Automation::new(AutomationConfig::default()).unwrap();

        let mut previous: Vec<OrderStatus> = Vec::new();
        for _ in 0..200 {
            automation.tick(&mut floor, &mut rng, Utc::now());
            floor.audit().unwrap();

            for (old, order) in previous.iter().zip(floor.orders()) {
                let (old, new) = (old.rank().unwrap(), order.status.rank().unwrap());
                assert!(new == old || new == old + 1, "{} -> {}", old, new);
            }
            previous = floor.orders().iter().map(|o| o.status).collect();
        }
        assert!(floor
            .orders()
            .iter()
            .all(|o| o.status != OrderStatus::Cancelled));
        assert!(floor
            .orders()
            .iter()
            .any(|o| o.status == OrderStatus::Completed));
    }
}
