/// Represents an item on the menu.
///
/// Orders never point back into the catalog for pricing: each
/// [`OrderLine`](crate::model::OrderLine) copies the name and price at the time it
/// was placed, so editing or removing an item leaves existing orders untouched.
use crate::model::Money;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for catalog items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItemId(pub u32);

impl From<u32> for CatalogItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CatalogItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub available: bool,
}

/// Payload for adding an item to the catalog.
#[derive(Debug, Clone)]
pub struct CatalogItemCreate {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub available: bool,
}

impl CatalogItemCreate {
    /// An available item with an empty description.
    pub fn new(name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            category: category.into(),
            available: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Payload for editing an item. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub available: Option<bool>,
}

impl CatalogItem {
    pub fn from_create(id: CatalogItemId, params: CatalogItemCreate) -> Self {
        Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            category: params.category,
            available: params.available,
        }
    }

    pub(crate) fn apply(&mut self, update: CatalogItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}
