pub mod tier;
pub mod variant;
pub mod pricing;
pub mod inventory;

pub use tier::{resolve_tier, PricingTier};
pub use variant::{BulkPrice, SegmentPrice, Variant};
pub use pricing::{bulk_savings, resolve_unit_price, BulkSavings, PriceQuote};
pub use inventory::{check_availability, clamp_quantity, Availability, InventoryRecord};
