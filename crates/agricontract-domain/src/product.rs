use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{parse_iso_date, Amount, DomainError, DomainResult, ProductId, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Vegetables,
    Fruits,
    Grains,
    Cereals,
    Pulses,
    Spices,
    Other,
}

impl ProductCategory {
    pub const ALL: [Self; 7] = [
        Self::Vegetables,
        Self::Fruits,
        Self::Grains,
        Self::Cereals,
        Self::Pulses,
        Self::Spices,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Grains => "Grains",
            Self::Cereals => "Cereals",
            Self::Pulses => "Pulses",
            Self::Spices => "Spices",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuantityUnit {
    #[default]
    Kg,
    Quintal,
    Ton,
    Piece,
    Dozen,
    Liter,
}

impl QuantityUnit {
    pub const ALL: [Self; 6] = [
        Self::Kg,
        Self::Quintal,
        Self::Ton,
        Self::Piece,
        Self::Dozen,
        Self::Liter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Quintal => "quintal",
            Self::Ton => "ton",
            Self::Piece => "piece",
            Self::Dozen => "dozen",
            Self::Liter => "liter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub quantity: u32,
    pub unit: QuantityUnit,
    pub price_per_unit: Amount,
    pub harvest_date: Date,
    pub farmer_id: UserId,
    pub farmer_name: String,
    pub description: String,
    pub location: Option<String>,
}

impl Product {
    /// Case-insensitive match on product name or category.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.category.label().to_lowercase().contains(&term)
    }

    pub fn is_listed_by(&self, user: &User) -> bool {
        self.farmer_id == user.id
    }
}

/// Raw text of the list-product form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductListing {
    pub name: String,
    pub category: Option<ProductCategory>,
    pub description: String,
    pub quantity: String,
    pub unit: QuantityUnit,
    pub price: String,
    pub harvest_date: String,
    pub location: String,
}

impl ProductListing {
    /// Fields the submit action waits on, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.quantity.trim().is_empty() {
            missing.push("quantity");
        }
        if self.price.trim().is_empty() {
            missing.push("price");
        }
        if self.harvest_date.trim().is_empty() {
            missing.push("harvest date");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn into_product(self, farmer: &User, listed_at: OffsetDateTime) -> DomainResult<Product> {
        if let Some(field) = self.missing_fields().first().copied() {
            return Err(DomainError::missing(field));
        }
        let category = self.category.ok_or_else(|| DomainError::missing("category"))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| DomainError::InvalidQuantity {
                field: "quantity",
                value: self.quantity.trim().to_owned(),
            })?;
        let price_per_unit = self.price.parse::<Amount>().map_err(|_| DomainError::InvalidAmount {
            field: "price",
            value: self.price.trim().to_owned(),
        })?;
        if price_per_unit.checked_times(quantity).is_none() {
            return Err(DomainError::InvalidAmount {
                field: "stock value",
                value: format!("{quantity} x {price_per_unit}"),
            });
        }
        let harvest_date = parse_iso_date(&self.harvest_date)?;
        let location = self.location.trim();

        Ok(Product {
            id: ProductId::issued_at(listed_at),
            name: self.name.trim().to_owned(),
            category,
            quantity,
            unit: self.unit,
            price_per_unit,
            harvest_date,
            farmer_id: farmer.id.clone(),
            farmer_name: farmer.name.clone(),
            description: self.description.trim().to_owned(),
            location: (!location.is_empty()).then(|| location.to_owned()),
        })
    }
}

/// One-shot message shown on the dashboard after a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardNotice {
    pub message: String,
    pub new_product: Option<Product>,
}
