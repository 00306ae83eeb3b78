//! Shared services: schema toolkit, cache and prefix manager
//!
//! Each service is built on first use and then handed out by `Arc`; later
//! calls ignore their arguments and return the same instance. A failed
//! construction leaves the slot empty so the next call can try again.

use crate::cache::{BoundedCache, CacheResult, DEFAULT_CACHE_SIZE};
use crate::config::KgxConfig;
use crate::curie::{CurieResult, PrefixManager};
use crate::schema::{ModelToolkit, SchemaResult, SchemaToolkit};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info, warn};

/// Cache shared between callers of one context
pub type SharedCache = Arc<Mutex<BoundedCache<String, String>>>;

#[derive(Debug, Default)]
pub struct KgxContext {
    schema: Option<PathBuf>,
    prefix_contexts: Vec<PathBuf>,
    cache_size: Option<usize>,
    toolkit: OnceLock<Arc<dyn SchemaToolkit>>,
    cache: OnceLock<SharedCache>,
    prefix_manager: OnceLock<Arc<PrefixManager>>,
}

impl KgxContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose services follow `config`
    pub fn from_config(config: &KgxConfig) -> Self {
        Self {
            schema: config.schema.clone(),
            prefix_contexts: config.prefix_contexts.clone(),
            cache_size: Some(config.cache_size),
            ..Self::default()
        }
    }

    /// Context with an already built toolkit
    pub fn with_toolkit(toolkit: Arc<dyn SchemaToolkit>) -> Self {
        let context = Self::default();
        let _ = context.toolkit.set(toolkit);
        context
    }

    /// The schema toolkit, loaded from `schema` (or the configured or
    /// embedded model) on first call
    pub fn toolkit(&self, schema: Option<&Path>) -> SchemaResult<Arc<dyn SchemaToolkit>> {
        if let Some(toolkit) = self.toolkit.get() {
            return Ok(Arc::clone(toolkit));
        }
        let source = schema.or(self.schema.as_deref());
        let built: Arc<dyn SchemaToolkit> = Arc::new(ModelToolkit::load(source)?);
        info!("Schema toolkit initialized");
        Ok(Arc::clone(self.toolkit.get_or_init(|| built)))
    }

    /// The cache, created with `maxsize` (or the configured size) on first call
    pub fn cache(&self, maxsize: Option<usize>) -> CacheResult<SharedCache> {
        if let Some(cache) = self.cache.get() {
            return Ok(Arc::clone(cache));
        }
        let capacity = maxsize.or(self.cache_size).unwrap_or(DEFAULT_CACHE_SIZE);
        let built = Arc::new(Mutex::new(BoundedCache::new(capacity)?));
        debug!("Cache initialized with capacity {}", capacity);
        Ok(Arc::clone(self.cache.get_or_init(|| built)))
    }

    /// The prefix manager over the configured JSON-LD contexts
    pub fn prefix_manager(&self) -> CurieResult<Arc<PrefixManager>> {
        if let Some(manager) = self.prefix_manager.get() {
            return Ok(Arc::clone(manager));
        }
        let built = Arc::new(PrefixManager::from_context_files(&self.prefix_contexts, true)?);
        Ok(Arc::clone(self.prefix_manager.get_or_init(|| built)))
    }

    /// Contract a URI through the prefix manager, memoized in the cache
    pub fn contract(&self, uri: &str) -> CurieResult<String> {
        let manager = self.prefix_manager()?;
        let cache = match self.cache(None) {
            Ok(cache) => cache,
            Err(e) => {
                warn!("Contracting without cache: {}", e);
                return Ok(manager.contract(uri));
            }
        };
        let key = format!("contract:{}", uri);
        let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(curie) = guard.get(&key) {
            return Ok(curie.clone());
        }
        let curie = manager.contract(uri);
        guard.put(key, curie.clone());
        Ok(curie)
    }
}
