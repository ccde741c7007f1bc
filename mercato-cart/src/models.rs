use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mercato_catalog::{Availability, BulkSavings, Variant};

/// Cart tunables, in the shape the deployment config deserializes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Upper bound for shopper-entered quantities when stock cannot cap them
    #[serde(default = "default_quantity_ceiling")]
    pub quantity_ceiling: u32,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_quantity_ceiling() -> u32 {
    999_999
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            quantity_ceiling: default_quantity_ceiling(),
        }
    }
}

/// One cart entry with its denormalized variant snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    /// Captured when the line was first added; prices the line when the
    /// snapshot is gone
    pub unit_price: i64,
    #[serde(default)]
    pub variant: Option<Variant>,
    pub added_at: DateTime<Utc>,
}

/// Quote and stock position for one line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAssessment {
    pub line_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: i64,
    pub is_bulk_price: bool,
    #[serde(default)]
    pub savings: Option<BulkSavings>,
    pub line_total: i64,
    pub availability: Availability,
}

/// Full-cart view handed to the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEvaluation {
    pub lines: Vec<LineAssessment>,
    pub subtotal: i64,
    pub item_count: u32,
    pub currency: String,
    /// True when any line cannot be satisfied from stock or backorder
    pub checkout_blocked: bool,
}

impl CartEvaluation {
    pub fn can_checkout(&self) -> bool {
        !self.checkout_blocked && !self.lines.is_empty()
    }

    /// Lines driving the warning banner
    pub fn unsatisfiable_lines(&self) -> Vec<Uuid> {
        self.lines
            .iter()
            .filter(|line| !line.availability.is_satisfiable)
            .map(|line| line.line_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.quantity_ceiling, 999_999);
    }

    #[test]
    fn test_config_fills_missing_fields() {
        let config: CartConfig = serde_json::from_str(r#"{"currency": "EUR"}"#).unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.quantity_ceiling, 999_999);
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let evaluation = CartEvaluation {
            lines: vec![],
            subtotal: 0,
            item_count: 0,
            currency: "USD".to_string(),
            checkout_blocked: false,
        };
        assert!(!evaluation.can_checkout());
    }
}
