use serde::{Deserialize, Serialize};

use crate::tier::PricingTier;
use crate::variant::Variant;

/// Outcome of unit-price resolution for one cart line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub unit_price: i64,
    pub is_bulk_price: bool,
}

/// Bulk discount shown next to the line price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkSavings {
    pub amount: i64,
    pub percent: u32,
}

/// Resolve the unit price to charge for `quantity` units of a variant.
///
/// Precedence, first match wins:
/// 1. a bulk band covering the quantity — segment and sale pricing are
///    bypassed entirely when one applies;
/// 2. the segment row the account's effective tier reads (B2B reads the B2C
///    row, ENTERPRISE_2 the ENTERPRISE_1 row);
/// 3. for a business account (anything but raw B2C) with no row of its own:
///    the variant's regular price — the public sale is a retail-only
///    promotion and must not leak into segment pricing;
/// 4. retail and guest shoppers: the sale price when positive, else the
///    regular price;
/// 5. the stored fallback captured when the line was added.
///
/// `tier` is the shopper's raw account type; row lookup applies
/// [`PricingTier::effective`] itself, and since the mapping is idempotent an
/// already-mapped value passes through unchanged.
///
/// Total over all inputs: every branch ends in a numeric price.
pub fn resolve_unit_price(
    variant: Option<&Variant>,
    quantity: u32,
    fallback_unit_price: i64,
    tier: Option<PricingTier>,
) -> PriceQuote {
    let Some(variant) = variant else {
        tracing::debug!("no variant snapshot, pricing from stored unit price {}", fallback_unit_price);
        return PriceQuote { unit_price: fallback_unit_price, is_bulk_price: false };
    };

    if let Some(band) = variant.bulk_price(quantity) {
        return PriceQuote { unit_price: band.price, is_bulk_price: true };
    }

    if let Some(account_type) = tier {
        if let Some(row) = variant.segment_price(account_type.effective()) {
            return PriceQuote { unit_price: row.charged_price(), is_bulk_price: false };
        }
        if account_type != PricingTier::B2c {
            return PriceQuote { unit_price: variant.regular_price, is_bulk_price: false };
        }
    }

    PriceQuote { unit_price: variant.list_price(), is_bulk_price: false }
}

/// Savings line shown when a bulk band undercuts the regular price.
/// Returns `None` for non-bulk quotes and for zero or negative savings.
pub fn bulk_savings(variant: &Variant, quote: &PriceQuote) -> Option<BulkSavings> {
    if !quote.is_bulk_price || variant.regular_price <= 0 {
        return None;
    }
    let amount = variant.regular_price - quote.unit_price;
    if amount <= 0 {
        return None;
    }
    let percent = ((amount as f64 / variant.regular_price as f64) * 100.0).round() as u32;
    Some(BulkSavings { amount, percent })
}
