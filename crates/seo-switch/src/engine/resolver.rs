//! Tiered switch resolution.
//!
//! Lookup order is a hard contract: category-specific content wins when it
//! exists, then the family pools, then the generic pools. An empty pool at
//! every step yields `None`.

use std::num::NonZeroUsize;

use futures::try_join;
use tracing::debug;

use crate::engine::RenderError;
use crate::repository::SwitchPoolRepository;
use crate::rotation::{
    LINK_ANCHOR_SLOT, LINK_TARGET_SLOT, RotationOffsets, reduce, rotation_index, rotation_seed,
};
use crate::types::{PoolScope, ResolutionContext, Tier};

/// A switch picked from a non-empty pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSwitch {
    /// The scope whose pool answered.
    pub scope: PoolScope,
    pub index: usize,
    pub pool_size: usize,
    pub content: String,
}

impl ResolvedSwitch {
    pub fn tier(&self) -> Tier {
        self.scope.tier()
    }
}

/// Both halves of a `#LinkGammeCar_<category>#` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPair {
    pub anchor: Option<String>,
    pub target: Option<String>,
    pub anchor_pool_size: usize,
    pub target_pool_size: usize,
}

impl LinkPair {
    /// True when both pools are non-empty but differently sized, so the two
    /// halves may not describe the same variant.
    pub fn is_mismatched(&self) -> bool {
        self.anchor_pool_size > 0
            && self.target_pool_size > 0
            && self.anchor_pool_size != self.target_pool_size
    }
}

/// Walks the three switch tiers over a repository.
pub struct TieredResolver<'a> {
    pools: &'a dyn SwitchPoolRepository,
    offsets: &'a RotationOffsets,
}

impl<'a> TieredResolver<'a> {
    pub fn new(pools: &'a dyn SwitchPoolRepository, offsets: &'a RotationOffsets) -> Self {
        Self { pools, offsets }
    }

    /// Scopes consulted for a request, most specific first.
    ///
    /// Wildcard retries are skipped when the requested category is already
    /// the wildcard.
    pub fn fallback_chain(family_id: u32, category_id: u32) -> Vec<PoolScope> {
        let mut chain = vec![
            PoolScope::CategorySpecific { category_id },
            PoolScope::FamilyScoped {
                family_id,
                category_id,
            },
        ];
        if category_id != 0 {
            chain.push(PoolScope::FamilyScoped {
                family_id,
                category_id: 0,
            });
        }
        chain.push(PoolScope::Generic { category_id });
        if category_id != 0 {
            chain.push(PoolScope::Generic { category_id: 0 });
        }
        chain
    }

    /// Resolve one slot for `category_id`, walking the fallback chain.
    ///
    /// Pools are fetched one at a time and the walk stops at the first
    /// non-empty one, so less specific tiers are never read once a more
    /// specific tier answered.
    pub async fn resolve_switch(
        &self,
        context: &ResolutionContext,
        category_id: u32,
        slot: u32,
    ) -> Result<Option<ResolvedSwitch>, RenderError> {
        for scope in Self::fallback_chain(context.family_id, category_id) {
            let mut pool = self.fetch(scope, slot).await?;
            let Some(pool_size) = NonZeroUsize::new(pool.len()) else {
                continue;
            };
            let index = rotation_index(
                scope.tier(),
                context.vehicle_type_id,
                category_id,
                slot,
                pool_size,
                self.offsets,
            );
            debug!(
                %scope,
                slot,
                index,
                pool_size = pool_size.get(),
                vehicle_type_id = context.vehicle_type_id,
                "resolved switch"
            );
            return Ok(Some(ResolvedSwitch {
                scope,
                index,
                pool_size: pool_size.get(),
                content: pool.swap_remove(index),
            }));
        }
        Ok(None)
    }

    /// Resolve the anchor/target pair of a category link.
    ///
    /// Only the category-specific tier is consulted. The rotation seed is
    /// computed once and reduced by each half's pool size, so equally sized
    /// pools always yield a matched pair.
    pub async fn resolve_link(
        &self,
        context: &ResolutionContext,
        category_id: u32,
    ) -> Result<LinkPair, RenderError> {
        let scope = PoolScope::CategorySpecific { category_id };
        let (anchors, targets) = try_join!(
            self.fetch(scope, LINK_ANCHOR_SLOT),
            self.fetch(scope, LINK_TARGET_SLOT)
        )?;
        let seed = rotation_seed(
            Tier::CategorySpecific,
            context.vehicle_type_id,
            category_id,
            LINK_ANCHOR_SLOT,
            self.offsets,
        );
        Ok(LinkPair {
            anchor_pool_size: anchors.len(),
            target_pool_size: targets.len(),
            anchor: pick(anchors, seed),
            target: pick(targets, seed),
        })
    }

    async fn fetch(&self, scope: PoolScope, slot: u32) -> Result<Vec<String>, RenderError> {
        self.pools
            .fetch(scope, slot)
            .await
            .map_err(|source| RenderError::SwitchPool {
                scope,
                slot,
                source,
            })
    }
}

fn pick(mut pool: Vec<String>, seed: u64) -> Option<String> {
    let size = NonZeroUsize::new(pool.len())?;
    Some(pool.swap_remove(reduce(seed, size)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_for_wildcard_category_has_no_duplicates() {
        let chain = TieredResolver::fallback_chain(4, 0);
        assert_eq!(
            chain,
            vec![
                PoolScope::CategorySpecific { category_id: 0 },
                PoolScope::FamilyScoped {
                    family_id: 4,
                    category_id: 0
                },
                PoolScope::Generic { category_id: 0 },
            ]
        );
    }

    #[test]
    fn chain_order() {
        let tiers: Vec<Tier> = TieredResolver::fallback_chain(4, 12)
            .iter()
            .map(PoolScope::tier)
            .collect();
        assert_eq!(
            tiers,
            vec![
                Tier::CategorySpecific,
                Tier::FamilyScoped,
                Tier::FamilyScoped,
                Tier::Generic,
                Tier::Generic,
            ]
        );
    }

    #[test]
    fn pick_reduces_seed_per_pool() {
        let pool = vec!["a".to_string(), "b".to_string()];
        assert_eq!(pick(pool, 5), Some("b".to_string()));
        assert_eq!(pick(Vec::new(), 5), None);
    }
}
