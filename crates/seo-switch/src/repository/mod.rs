//! Collaborators the engine reads from.
//!
//! Storage is owned elsewhere; the engine only needs ordered pools and a
//! minimum price. "No rows" is an empty result, never an error.

mod memory;

use std::error::Error;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::types::PoolScope;

pub use memory::{MemoryPriceAggregate, MemorySwitchPools};

/// Error type returned by collaborators.
pub type UpstreamError = Box<dyn Error + Send + Sync + 'static>;

/// Read-only access to switch pools.
#[async_trait]
pub trait SwitchPoolRepository: Send + Sync {
    /// Fetch the ordered contents of one pool.
    ///
    /// Must return an empty vector when the pool has no rows. Ordering must be
    /// stable between calls since rotation indices point into it.
    async fn fetch(&self, scope: PoolScope, slot: u32) -> Result<Vec<String>, UpstreamError>;
}

/// Minimum sellable price for a category/vehicle pair.
#[async_trait]
pub trait PriceAggregate: Send + Sync {
    /// Returns `None` when no SKU is sellable for the pair.
    async fn min_price(
        &self,
        category_id: u32,
        vehicle_type_id: u32,
    ) -> Result<Option<Decimal>, UpstreamError>;
}
