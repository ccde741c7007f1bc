use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inventory::InventoryRecord;
use crate::tier::PricingTier;

/// A quantity-banded price row. An absent `max_qty` leaves the band
/// open-ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPrice {
    pub min_qty: u32,
    #[serde(default)]
    pub max_qty: Option<u32>,
    pub price: i64,
}

impl BulkPrice {
    /// Whether this band covers the requested quantity
    pub fn covers(&self, quantity: u32) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity <= max)
    }
}

/// Per-tier price row. The catalog stores at most one row per tier;
/// `sale_price` of 0 means the segment has no sale running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPrice {
    pub customer_type: PricingTier,
    pub regular_price: i64,
    #[serde(default)]
    pub sale_price: i64,
}

impl SegmentPrice {
    /// Charged price for this row: the segment sale when positive, else the
    /// segment regular price
    pub fn charged_price(&self) -> i64 {
        if self.sale_price > 0 {
            self.sale_price
        } else {
            self.regular_price
        }
    }
}

/// Denormalized variant snapshot as the catalog API returns it.
///
/// Prices are integer minor units. The snapshot is read-only here; the
/// catalog and inventory subsystems own all mutation, and the cart re-fetches
/// after every server write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: Uuid,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub regular_price: i64,
    /// 0 means "no sale"
    #[serde(default)]
    pub sale_price: i64,
    #[serde(default)]
    pub bulk_prices: Vec<BulkPrice>,
    #[serde(default)]
    pub segment_prices: Vec<SegmentPrice>,
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Variant {
    /// Public storefront price: the sale price when a sale is running,
    /// the regular price otherwise
    pub fn list_price(&self) -> i64 {
        if self.sale_price > 0 {
            self.sale_price
        } else {
            self.regular_price
        }
    }

    pub fn is_on_sale(&self) -> bool {
        self.sale_price > 0 && self.sale_price < self.regular_price
    }

    /// First bulk band covering the quantity, in stored row order
    pub fn bulk_price(&self, quantity: u32) -> Option<&BulkPrice> {
        self.bulk_prices.iter().find(|band| band.covers(quantity))
    }

    /// Price row for a tier, if the catalog defines one
    pub fn segment_price(&self, tier: PricingTier) -> Option<&SegmentPrice> {
        self.segment_prices.iter().find(|row| row.customer_type == tier)
    }
}
