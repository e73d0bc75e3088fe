//! Rendered-page cache with explicit invalidation.
//!
//! Entries never expire on their own: a page must stay byte-stable between
//! crawler visits, so the only way to drop one is an invalidation call from
//! whoever mutated the underlying pools or templates.

use std::collections::BTreeSet;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::engine::RenderError;
use crate::engine::diagnostics::Rendered;
use crate::types::{ResolutionContext, TemplateId};

/// Cache key: one rendered template of one `(vehicle type, category)` page.
///
/// Hashing uses the template fingerprint; equality also compares the
/// template text, so fingerprint collisions never share an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub vehicle_type_id: u32,
    pub category_id: u32,
    pub template: TemplateId,
    source: Arc<str>,
}

impl CacheKey {
    pub fn new(context: &ResolutionContext, template: &str) -> Self {
        Self {
            vehicle_type_id: context.vehicle_type_id,
            category_id: context.category_id,
            template: TemplateId::from_template(template),
            source: Arc::from(template),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vehicle_type_id.hash(state);
        self.category_id.hash(state);
        self.template.hash(state);
    }
}

#[derive(Debug)]
struct CachedPage {
    text: String,
    /// Switch categories consulted while rendering.
    categories: BTreeSet<u32>,
}

impl From<Rendered> for CachedPage {
    fn from(rendered: Rendered) -> Self {
        Self {
            text: rendered.text,
            categories: rendered.categories,
        }
    }
}

/// Concurrent map of rendered pages.
///
/// Each key holds a [`OnceCell`], so concurrent renders of the same key share
/// one computation. A failed computation removes its cell and the next caller
/// retries.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: DashMap<CacheKey, Arc<OnceCell<CachedPage>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached text for `key`, if rendered.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.entries
            .get(key)
            .and_then(|cell| cell.get().map(|page| page.text.clone()))
    }

    /// Return the cached text for `key`, rendering it with `render` on a miss.
    pub async fn get_or_try_render<F, Fut>(
        &self,
        key: CacheKey,
        render: F,
    ) -> Result<String, RenderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Rendered, RenderError>>,
    {
        // Clone the cell out so no shard lock is held across the await.
        let cell = self.entries.entry(key.clone()).or_default().clone();
        if let Some(page) = cell.get() {
            debug!(
                vehicle_type_id = key.vehicle_type_id,
                category_id = key.category_id,
                template = %key.template,
                "cache hit"
            );
            return Ok(page.text.clone());
        }
        debug!(
            vehicle_type_id = key.vehicle_type_id,
            category_id = key.category_id,
            template = %key.template,
            "cache miss"
        );
        let rendered = cell
            .get_or_try_init(|| async move { render().await.map(CachedPage::from) })
            .await;
        match rendered {
            Ok(page) => Ok(page.text.clone()),
            Err(error) => {
                self.entries.remove_if(&key, |_, current| {
                    Arc::ptr_eq(current, &cell) && !current.initialized()
                });
                Err(error)
            }
        }
    }

    /// Drop every cached template of one page. Returns the number removed.
    pub fn invalidate(&self, vehicle_type_id: u32, category_id: u32) -> usize {
        let removed = self.remove_where(|key, _| {
            key.vehicle_type_id == vehicle_type_id && key.category_id == category_id
        });
        debug!(vehicle_type_id, category_id, removed, "invalidated page");
        removed
    }

    /// Drop every cached page that belongs to `category_id` or looked up one
    /// of its switch pools, across all vehicle types.
    pub fn invalidate_scope(&self, category_id: u32) -> usize {
        let removed = self.remove_where(|key, page| {
            key.category_id == category_id
                || page.is_some_and(|page| page.categories.contains(&category_id))
        });
        debug!(category_id, removed, "invalidated category");
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
        debug!("cleared resolution cache");
    }

    /// Number of rendered entries.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove_where(&self, predicate: impl Fn(&CacheKey, Option<&CachedPage>) -> bool) -> usize {
        let mut removed = 0;
        self.entries.retain(|key, cell| {
            if !predicate(key, cell.get()) {
                return true;
            }
            if cell.initialized() {
                removed += 1;
            }
            false
        });
        removed
    }
}
