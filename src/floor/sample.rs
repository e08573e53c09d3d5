//! Seed data for a freshly opened floor.

use super::Floor;
use crate::model::{CatalogItemCreate, Money};

const SAMPLE_MENU: [(&str, &str, i64, &str); 8] = [
    ("Pizza Margherita", "Tomato, mozzarella and basil", 1299, "Pizza"),
    ("Chicken Pizza", "Chicken, mozzarella and vegetables", 1499, "Pizza"),
    ("Caesar Salad", "Romaine, parmesan and croutons", 899, "Salads"),
    ("Grilled Chicken", "Herb-marinated chicken breast", 1699, "Mains"),
    ("Chocolate Cake", "House-made chocolate cake", 699, "Desserts"),
    ("Fresh Orange Juice", "Freshly squeezed orange juice", 399, "Drinks"),
    ("Mint Tea", "Traditional green tea with mint", 299, "Drinks"),
    ("Turkish Coffee", "Traditional Turkish coffee", 250, "Drinks"),
];

const SAMPLE_TABLES: u32 = 12;

/// Seat count by table number: 1-6 seat four, 7-9 seat six, the rest seat eight.
fn capacity_for(number: u32) -> u32 {
    match number {
        1..=6 => 4,
        7..=9 => 6,
        _ => 8,
    }
}

impl Floor {
    /// A floor with the demo menu and twelve available tables.
    pub fn sample() -> Self {
        let mut floor = Floor::new();
        for (name, description, cents, category) in SAMPLE_MENU {
            floor.insert_catalog_item(
                CatalogItemCreate::new(name, Money::from_cents(cents), category)
                    .with_description(description),
            );
        }
        for number in 1..=SAMPLE_TABLES {
            floor.add_table(number, capacity_for(number));
        }
        floor
    }
}
