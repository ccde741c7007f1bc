use chrono::{DateTime, Utc};
use uuid::Uuid;

use mercato_catalog::{
    bulk_savings, check_availability, clamp_quantity, resolve_unit_price, PricingTier, Variant,
};

use crate::events::{
    CartClearedEvent, CartEvent, LineAddedEvent, LineRemovedEvent, QuantityChangedEvent,
};
use crate::models::{CartConfig, CartEvaluation, CartLine, LineAssessment};
use crate::provider::VariantProvider;

/// A shopper's cart, owned by the request context.
///
/// All mutation goes through these methods. The authoritative variant and
/// inventory state lives with the catalog service and arrives here only as
/// denormalized snapshots; after every server write the surrounding flow
/// calls [`CartSession::refresh_snapshots`] and the last fetched snapshot
/// wins.
#[derive(Debug, Clone)]
pub struct CartSession {
    pub id: Uuid,
    pub customer_id: Option<String>,
    /// Raw account type; the price resolver maps it to its effective tier
    pub account_type: Option<PricingTier>,
    config: CartConfig,
    lines: Vec<CartLine>,
    events: Vec<CartEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartSession {
    /// Anonymous (guest) cart
    pub fn new(config: CartConfig) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id: None,
            account_type: None,
            config,
            lines: Vec::new(),
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn for_customer(
        customer_id: impl Into<String>,
        account_type: Option<PricingTier>,
        config: CartConfig,
    ) -> Self {
        let mut session = Self::new(config);
        session.customer_id = Some(customer_id.into());
        session.account_type = account_type;
        session
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Add units of a variant. A line for the same variant already in the
    /// cart absorbs the quantity and takes the newer snapshot; its stored
    /// unit price stays the one captured when the line was first added.
    pub fn add_line(&mut self, variant: Variant, quantity: u32) -> Result<Uuid, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let event = if let Some(existing) =
            self.lines.iter_mut().find(|line| line.variant_id == variant.id)
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.variant = Some(variant);
            LineAddedEvent {
                cart_id: self.id,
                line_id: existing.id,
                variant_id: existing.variant_id,
                quantity,
                unit_price: existing.unit_price,
                timestamp: Utc::now().timestamp(),
            }
        } else {
            let quote = resolve_unit_price(Some(&variant), quantity, 0, self.account_type);
            let line = CartLine {
                id: Uuid::new_v4(),
                variant_id: variant.id,
                quantity,
                unit_price: quote.unit_price,
                variant: Some(variant),
                added_at: Utc::now(),
            };
            let event = LineAddedEvent {
                cart_id: self.id,
                line_id: line.id,
                variant_id: line.variant_id,
                quantity,
                unit_price: line.unit_price,
                timestamp: Utc::now().timestamp(),
            };
            self.lines.push(line);
            event
        };

        let line_id = event.line_id;
        tracing::debug!(
            "cart {}: added {} of variant {} on line {}",
            self.id,
            quantity,
            event.variant_id,
            line_id
        );
        self.touch();
        self.events.push(CartEvent::LineAdded(event));
        Ok(line_id)
    }

    /// Apply a shopper-entered quantity, clamped against the line's current
    /// stock position. Returns the value actually stored.
    pub fn set_quantity(&mut self, line_id: &Uuid, requested: u32) -> Result<u32, CartError> {
        let ceiling = self.config.quantity_ceiling;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == *line_id)
            .ok_or(CartError::LineNotFound(*line_id))?;

        let records = line
            .variant
            .as_ref()
            .map(|variant| variant.inventory.as_slice())
            .unwrap_or(&[]);
        let availability = check_availability(records, requested);
        let accepted = clamp_quantity(requested, &availability, ceiling);
        line.quantity = accepted;

        if accepted != requested {
            tracing::debug!(
                "cart {}: line {} quantity clamped from {} to {}",
                self.id,
                line_id,
                requested,
                accepted
            );
        }
        self.touch();
        self.events.push(CartEvent::QuantityChanged(QuantityChangedEvent {
            cart_id: self.id,
            line_id: *line_id,
            requested,
            accepted,
            timestamp: Utc::now().timestamp(),
        }));
        Ok(accepted)
    }

    pub fn remove_line(&mut self, line_id: &Uuid) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != *line_id);
        if self.lines.len() == before {
            return Err(CartError::LineNotFound(*line_id));
        }
        self.touch();
        self.events.push(CartEvent::LineRemoved(LineRemovedEvent {
            cart_id: self.id,
            line_id: *line_id,
            timestamp: Utc::now().timestamp(),
        }));
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.lines.clear();
        self.touch();
        self.events.push(CartEvent::CartCleared(CartClearedEvent {
            cart_id: self.id,
            timestamp: Utc::now().timestamp(),
        }));
    }

    /// Re-fetch every line's snapshot after a server round-trip. A variant
    /// the catalog no longer returns loses its snapshot; the line then
    /// prices from its stored fallback and blocks checkout. Returns the
    /// number of lines that got a fresh snapshot.
    pub async fn refresh_snapshots(
        &mut self,
        provider: &dyn VariantProvider,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        let mut refreshed = 0;
        for line in &mut self.lines {
            match provider.variant_snapshot(line.variant_id).await? {
                Some(variant) => {
                    line.variant = Some(variant);
                    refreshed += 1;
                }
                None => {
                    tracing::warn!(
                        "cart {}: variant {} no longer in catalog, line {} keeps its stored price",
                        self.id,
                        line.variant_id,
                        line.id
                    );
                    line.variant = None;
                }
            }
        }
        self.touch();
        Ok(refreshed)
    }

    /// Price and stock-check every line. Pure recomputation over the held
    /// snapshots; nothing here talks to the network.
    pub fn evaluate(&self) -> CartEvaluation {
        let tier = self.account_type;
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut subtotal: i64 = 0;
        let mut item_count: u32 = 0;
        let mut checkout_blocked = false;

        for line in &self.lines {
            let quote =
                resolve_unit_price(line.variant.as_ref(), line.quantity, line.unit_price, tier);
            let savings = line.variant.as_ref().and_then(|variant| bulk_savings(variant, &quote));
            let records = line
                .variant
                .as_ref()
                .map(|variant| variant.inventory.as_slice())
                .unwrap_or(&[]);
            let availability = check_availability(records, line.quantity);
            if !availability.is_satisfiable {
                checkout_blocked = true;
            }

            let line_total = quote.unit_price * i64::from(line.quantity);
            subtotal += line_total;
            item_count += line.quantity;
            lines.push(LineAssessment {
                line_id: line.id,
                variant_id: line.variant_id,
                quantity: line.quantity,
                unit_price: quote.unit_price,
                is_bulk_price: quote.is_bulk_price,
                savings,
                line_total,
                availability,
            });
        }

        if checkout_blocked {
            tracing::warn!("cart {}: checkout blocked by unsatisfiable lines", self.id);
        }

        CartEvaluation {
            lines,
            subtotal,
            item_count,
            currency: self.config.currency.clone(),
            checkout_blocked,
        }
    }

    /// Drain buffered mutation events for the surrounding platform to publish
    pub fn take_events(&mut self) -> Vec<CartEvent> {
        std::mem::take(&mut self.events)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Cart line not found: {0}")]
    LineNotFound(Uuid),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
}
