//! In-memory collaborators for admin preview fixtures and tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::repository::{PriceAggregate, SwitchPoolRepository, UpstreamError};
use crate::types::{PoolScope, SwitchEntry};

/// Switch pools held in memory, keyed by `(scope, slot)`.
///
/// Every fetch is recorded so callers can inspect which scopes were
/// consulted, in order.
#[derive(Debug, Default)]
pub struct MemorySwitchPools {
    pools: HashMap<(PoolScope, u32), Vec<String>>,
    fetches: Mutex<Vec<(PoolScope, u32)>>,
}

impl MemorySwitchPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build pools from entries, keeping their relative order within a pool.
    pub fn from_entries(entries: impl IntoIterator<Item = SwitchEntry>) -> Self {
        let mut pools = Self::new();
        for entry in entries {
            pools.push(entry);
        }
        pools
    }

    /// Load entries from a JSON array of [`SwitchEntry`].
    ///
    /// ```
    /// use seo_switch::repository::MemorySwitchPools;
    ///
    /// let pools = MemorySwitchPools::from_json_str(r#"[
    ///     { "tier": "generic", "category_id": 0, "slot": 1, "content": "Pièces auto" }
    /// ]"#).unwrap();
    /// assert_eq!(pools.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<SwitchEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Append one entry to the end of its pool.
    pub fn push(&mut self, entry: SwitchEntry) {
        self.pools
            .entry((entry.scope, entry.slot))
            .or_default()
            .push(entry.content);
    }

    /// Replace a whole pool.
    pub fn with_pool<S: Into<String>>(
        mut self,
        scope: PoolScope,
        slot: u32,
        contents: impl IntoIterator<Item = S>,
    ) -> Self {
        self.pools
            .insert((scope, slot), contents.into_iter().map(Into::into).collect());
        self
    }

    /// Number of non-empty pools.
    pub fn len(&self) -> usize {
        self.pools.values().filter(|pool| !pool.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every `(scope, slot)` fetched so far, in call order.
    pub fn fetches(&self) -> Vec<(PoolScope, u32)> {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SwitchPoolRepository for MemorySwitchPools {
    async fn fetch(&self, scope: PoolScope, slot: u32) -> Result<Vec<String>, UpstreamError> {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((scope, slot));
        Ok(self.pools.get(&(scope, slot)).cloned().unwrap_or_default())
    }
}

/// Minimum prices held in memory, keyed by `(category_id, vehicle_type_id)`.
#[derive(Debug, Default, Clone)]
pub struct MemoryPriceAggregate {
    prices: HashMap<(u32, u32), Decimal>,
}

impl MemoryPriceAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, category_id: u32, vehicle_type_id: u32, price: Decimal) -> Self {
        self.prices.insert((category_id, vehicle_type_id), price);
        self
    }
}

#[async_trait]
impl PriceAggregate for MemoryPriceAggregate {
    async fn min_price(
        &self,
        category_id: u32,
        vehicle_type_id: u32,
    ) -> Result<Option<Decimal>, UpstreamError> {
        Ok(self.prices.get(&(category_id, vehicle_type_id)).copied())
    }
}
