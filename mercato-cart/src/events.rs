use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineAddedEvent {
    pub cart_id: Uuid,
    pub line_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: i64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityChangedEvent {
    pub cart_id: Uuid,
    pub line_id: Uuid,
    pub requested: u32,
    pub accepted: u32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRemovedEvent {
    pub cart_id: Uuid,
    pub line_id: Uuid,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartClearedEvent {
    pub cart_id: Uuid,
    pub timestamp: i64,
}

/// Cart mutation events, buffered on the session until the surrounding
/// platform drains and publishes them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEvent {
    LineAdded(LineAddedEvent),
    QuantityChanged(QuantityChangedEvent),
    LineRemoved(LineRemovedEvent),
    CartCleared(CartClearedEvent),
}
