use serde::{Deserialize, Serialize};

/// Customer account classifications that participate in catalog pricing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PricingTier {
    #[serde(rename = "B2C")]
    B2c,
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "ENTERPRISE_1")]
    Enterprise1,
    #[serde(rename = "ENTERPRISE_2")]
    Enterprise2,
}

impl PricingTier {
    /// The tier whose price rows this account actually reads. B2B and
    /// ENTERPRISE_2 are billing classifications and never carry catalog
    /// price rows of their own.
    pub fn effective(self) -> PricingTier {
        match self {
            PricingTier::B2b => PricingTier::B2c,
            PricingTier::Enterprise2 => PricingTier::Enterprise1,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::B2c => "B2C",
            PricingTier::B2b => "B2B",
            PricingTier::Enterprise1 => "ENTERPRISE_1",
            PricingTier::Enterprise2 => "ENTERPRISE_2",
        }
    }
}

impl std::fmt::Display for PricingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a raw account type to its effective pricing tier; guests stay guests
pub fn resolve_tier(account_type: Option<PricingTier>) -> Option<PricingTier> {
    account_type.map(PricingTier::effective)
}
