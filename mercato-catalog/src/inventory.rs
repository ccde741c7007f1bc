use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-location stock row for a variant, as the inventory API returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub reserved_qty: i64,
    #[serde(default)]
    pub sell_when_out_of_stock: bool,
}

impl InventoryRecord {
    /// Units sellable from this location; an over-reserved location counts 0
    pub fn available(&self) -> i64 {
        (self.quantity - self.reserved_qty).max(0)
    }
}

/// Stock position for one requested cart line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: i64,
    pub can_backorder: bool,
    pub is_satisfiable: bool,
}

/// Sum availability across locations and decide whether the requested
/// quantity can be honored. Any location flagged sellWhenOutOfStock lets the
/// line through regardless of stock on hand.
pub fn check_availability(records: &[InventoryRecord], requested_qty: u32) -> Availability {
    let available: i64 = records.iter().map(InventoryRecord::available).sum();
    let can_backorder = records.iter().any(|record| record.sell_when_out_of_stock);
    Availability {
        available,
        can_backorder,
        is_satisfiable: available >= i64::from(requested_qty) || can_backorder,
    }
}

/// Clamp a shopper-entered quantity against the stock position.
///
/// Without backorder the value is held to the available units. A line with
/// zero stock and no backorder passes through capped only by `ceiling` and
/// the server rejects the write. The floor is always 1.
pub fn clamp_quantity(requested: u32, availability: &Availability, ceiling: u32) -> u32 {
    let upper = if availability.can_backorder || availability.available == 0 {
        ceiling
    } else {
        availability.available.min(i64::from(ceiling)) as u32
    };
    requested.clamp(1, upper.max(1))
}
