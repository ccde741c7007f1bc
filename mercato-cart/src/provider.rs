use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use mercato_catalog::Variant;

/// Data-fetching seam to the catalog service that owns variant state.
/// The cart only ever reads snapshots through it; writes, retries and
/// timeouts belong to the implementation behind the trait.
#[async_trait]
pub trait VariantProvider: Send + Sync {
    async fn variant_snapshot(
        &self,
        variant_id: Uuid,
    ) -> Result<Option<Variant>, Box<dyn std::error::Error + Send + Sync>>;
}

/// HashMap-backed provider for tests and single-process setups
#[derive(Debug, Default)]
pub struct InMemoryVariantProvider {
    variants: HashMap<Uuid, Variant>,
}

impl InMemoryVariantProvider {
    pub fn new() -> Self {
        Self {
            variants: HashMap::new(),
        }
    }

    pub fn upsert(&mut self, variant: Variant) {
        self.variants.insert(variant.id, variant);
    }

    pub fn remove(&mut self, variant_id: &Uuid) {
        self.variants.remove(variant_id);
    }
}

#[async_trait]
impl VariantProvider for InMemoryVariantProvider {
    async fn variant_snapshot(
        &self,
        variant_id: Uuid,
    ) -> Result<Option<Variant>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.variants.get(&variant_id).cloned())
    }
}
