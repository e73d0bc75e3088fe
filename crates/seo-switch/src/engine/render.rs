//! User-facing engine API.

use std::sync::Arc;

use tracing::warn;

use crate::config::{ConfigError, EngineConfig};
use crate::engine::cache::{CacheKey, ResolutionCache};
use crate::engine::derived::DerivedVariables;
use crate::engine::diagnostics::Rendered;
use crate::engine::resolver::{LinkPair, ResolvedSwitch, TieredResolver};
use crate::engine::scope::RenderScope;
use crate::engine::RenderError;
use crate::repository::{PriceAggregate, SwitchPoolRepository};
use crate::types::ResolutionContext;

/// Renders templates into page content.
///
/// The engine owns a [`ResolutionCache`]; whoever mutates switch pools or
/// templates must call [`invalidate`](Self::invalidate) or
/// [`invalidate_scope`](Self::invalidate_scope) afterwards.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use seo_switch::{EngineConfig, PoolScope, ResolutionContext, SwitchEngine};
/// use seo_switch::repository::MemorySwitchPools;
///
/// # futures::executor::block_on(async {
/// let pools = MemorySwitchPools::new().with_pool(
///     PoolScope::Generic { category_id: 2462 },
///     1,
///     ["Pièce A", "Pièce B", "Pièce C"],
/// );
/// let engine = SwitchEngine::new(Arc::new(pools), EngineConfig::default()).unwrap();
/// let ctx = ResolutionContext::builder()
///     .vehicle_type_id(17484)
///     .category_id(2462)
///     .family_id(1)
///     .build();
///
/// let text = engine.render("#CompSwitch_1_2462#", &ctx).await.unwrap();
/// assert_eq!(text, "Pièce A");
/// # });
/// ```
pub struct SwitchEngine {
    pools: Arc<dyn SwitchPoolRepository>,
    prices: Option<Arc<dyn PriceAggregate>>,
    config: EngineConfig,
    cache: ResolutionCache,
}

impl SwitchEngine {
    /// Create an engine over a switch pool repository.
    ///
    /// Without a price aggregate, `#MinPrice#` only renders prices supplied
    /// through [`PricingContext::Known`](crate::PricingContext::Known).
    pub fn new(
        pools: Arc<dyn SwitchPoolRepository>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pools,
            prices: None,
            config,
            cache: ResolutionCache::new(),
        })
    }

    /// Attach the collaborator queried for deferred `#MinPrice#` values.
    pub fn with_price_aggregate(mut self, prices: Arc<dyn PriceAggregate>) -> Self {
        self.prices = Some(prices);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render a template, serving repeat requests from the cache.
    ///
    /// Missing data never fails a render: unresolved placeholders stay in the
    /// output verbatim and are logged. Only collaborator failures are errors,
    /// and failed renders are not cached.
    pub async fn render(
        &self,
        template: &str,
        context: &ResolutionContext,
    ) -> Result<String, RenderError> {
        let key = CacheKey::new(context, template);
        self.cache
            .get_or_try_render(key, || self.render_uncached(template, context))
            .await
    }

    /// Render a template without reading or writing the cache.
    ///
    /// Used by preview and diff tooling, which also get the diagnostics.
    pub async fn render_uncached(
        &self,
        template: &str,
        context: &ResolutionContext,
    ) -> Result<Rendered, RenderError> {
        let expansion = self
            .expand(template, context, RenderScope::new(self.config.max_depth))
            .await?;
        for diagnostic in &expansion.diagnostics {
            warn!(
                code = %diagnostic.code,
                token = %diagnostic.token,
                vehicle_type_id = context.vehicle_type_id,
                category_id = context.category_id,
                "{}",
                diagnostic.detail
            );
        }
        Ok(Rendered {
            text: expansion.text,
            diagnostics: expansion.diagnostics,
            categories: expansion.categories,
        })
    }

    /// Resolve a single switch slot through the tier fallback chain.
    pub async fn resolve_switch(
        &self,
        context: &ResolutionContext,
        category_id: u32,
        slot: u32,
    ) -> Result<Option<ResolvedSwitch>, RenderError> {
        self.resolver()
            .resolve_switch(context, category_id, slot)
            .await
    }

    /// Resolve both halves of a category link.
    pub async fn resolve_link(
        &self,
        context: &ResolutionContext,
        category_id: u32,
    ) -> Result<LinkPair, RenderError> {
        self.resolver().resolve_link(context, category_id).await
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Drop cached renders of one page after its data changed.
    pub fn invalidate(&self, vehicle_type_id: u32, category_id: u32) -> usize {
        self.cache.invalidate(vehicle_type_id, category_id)
    }

    /// Drop cached renders of every page that belongs to a category or looked
    /// up one of its switch pools.
    ///
    /// Required after any insert or delete in a `CategorySpecific`,
    /// `FamilyScoped { category_id, .. }` or `Generic { category_id }` pool
    /// with a non-zero category: rotation indices depend on pool size, so
    /// every page mapped to the pool may change. Edits to the wildcard pools
    /// (`category_id == 0`) can reach any page and need
    /// [`invalidate_all`](Self::invalidate_all).
    pub fn invalidate_scope(&self, category_id: u32) -> usize {
        self.cache.invalidate_scope(category_id)
    }

    /// Drop every cached render.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    pub(crate) fn resolver(&self) -> TieredResolver<'_> {
        TieredResolver::new(self.pools.as_ref(), &self.config.offsets)
    }

    pub(crate) fn derived(&self) -> DerivedVariables<'_> {
        DerivedVariables::new(&self.config, self.prices.as_deref())
    }
}
