/// Represents a customer order placed at a table.
///
/// The lifecycle is strictly forward:
/// `Pending -> Preparing -> Ready -> Served -> Completed`, with `Cancelled`
/// reachable from any non-terminal status by an explicit user action.
use crate::model::{AmountOverflow, CatalogItem, CatalogItemId, Money, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The kitchen stages, as (from, to) pairs, in the order they are walked.
    pub const KITCHEN_STAGES: [(OrderStatus, OrderStatus); 3] = [
        (OrderStatus::Pending, OrderStatus::Preparing),
        (OrderStatus::Preparing, OrderStatus::Ready),
        (OrderStatus::Ready, OrderStatus::Served),
    ];

    /// The single forward successor, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Position along the forward lifecycle. `Cancelled` has none.
    pub fn rank(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Preparing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Served => Some(3),
            OrderStatus::Completed => Some(4),
            OrderStatus::Cancelled => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Digital,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Digital,
    ];
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Digital => "digital",
        })
    }
}

/// One catalog item on an order, priced when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_ref: CatalogItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            item_ref: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    pub fn line_total(&self) -> Result<Money, AmountOverflow> {
        self.unit_price.checked_mul(self.quantity)
    }

    /// Adds `quantity` of `item` to `lines`, bumping an existing line for the same
    /// item instead of appending a duplicate. `lines` is untouched on overflow.
    pub fn merge_into(
        lines: &mut Vec<OrderLine>,
        item: &CatalogItem,
        quantity: u32,
    ) -> Result<(), AmountOverflow> {
        match lines.iter_mut().find(|line| line.item_ref == item.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or(AmountOverflow)?;
            }
            None => lines.push(OrderLine::new(item, quantity)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub table_id: TableId,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a pending, unpaid order and computes its total from `lines`.
    pub fn new(
        id: OrderId,
        table_id: TableId,
        lines: Vec<OrderLine>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, AmountOverflow> {
        let total = Self::total_of(&lines)?;
        Ok(Self {
            id,
            table_id,
            lines,
            status: OrderStatus::Pending,
            total,
            payment_status: PaymentStatus::Unpaid,
            payment_method: None,
            created_at,
            completed_at: None,
        })
    }

    /// Exact total of `lines`.
    pub fn total_of(lines: &[OrderLine]) -> Result<Money, AmountOverflow> {
        let totals = lines
            .iter()
            .map(OrderLine::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::checked_sum(totals)
    }

    /// Replaces the lines and total, keeping id, status and creation time.
    pub(crate) fn replace_lines(&mut self, lines: Vec<OrderLine>) -> Result<(), AmountOverflow> {
        self.total = Self::total_of(&lines)?;
        self.lines = lines;
        Ok(())
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn is_settleable(&self) -> bool {
        self.status == OrderStatus::Served && self.payment_status == PaymentStatus::Unpaid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, cents: i64) -> CatalogItem {
        CatalogItem {
            id: CatalogItemId(id),
            name: format!("Dish {}", id),
            description: String::new(),
            price: Money::from_cents(cents),
            category: "Mains".to_string(),
            available: true,
        }
    }

    #[test]
    fn test_next_walks_forward_and_stops_at_terminal() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            assert!(next.rank() > status.rank());
            status = next;
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
                OrderStatus::Completed,
            ]
        );
        assert_eq!(OrderStatus::Cancelled.next(), None);
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_merge_into_aggregates_duplicates() {
        let pizza = item(1, 1299);
        let tea = item(2, 299);
        let mut lines = Vec::new();
        OrderLine::merge_into(&mut lines, &pizza, 1).unwrap();
        OrderLine::merge_into(&mut lines, &tea, 1).unwrap();
        OrderLine::merge_into(&mut lines, &pizza, 1).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[1].quantity, 1);

        let order = Order::new(OrderId(1), TableId(1), lines, Utc::now()).unwrap();
        assert_eq!(order.total, Money::from_cents(2 * 1299 + 299));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert!(!order.is_settleable());
    }

    #[test]
    fn test_overflowing_lines_are_rejected() {
        let pizza = item(1, 1299);
        let mut lines = vec![OrderLine::new(&pizza, u32::MAX)];
        assert_eq!(
            OrderLine::merge_into(&mut lines, &pizza, 1),
            Err(AmountOverflow)
        );
        assert_eq!(lines[0].quantity, u32::MAX);

        let pricey = item(2, i64::MAX);
        let lines = vec![OrderLine::new(&pricey, 2)];
        assert_eq!(
            Order::new(OrderId(1), TableId(1), lines, Utc::now()),
            Err(AmountOverflow)
        );
    }
}
