use crate::context::ActiveValues;
use crate::errors::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use itertools::Itertools;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub mod builtins;

pub use builtins::{DeviceContextProvider, DeviceInfo, DeviceSystem, StaticContextProvider, SwitchContextProvider};

/// Source of current values for the selectors of one domain.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Values for `keys`, keyed by the bare key (without the domain prefix).
    /// An empty `keys` slice asks for every value the provider knows.
    /// Keys the provider does not know are simply left out.
    async fn get_value(&self, keys: &[String]) -> Result<ActiveValues>;
}

/// Split `device.system` into (`device`, Some(`system`)); `device` into (`device`, None).
pub fn split_selector(selector: &str) -> (&str, Option<&str>) {
    match selector.split_once('.') {
        Some((domain, key)) => (domain, Some(key)),
        None => (selector, None),
    }
}

/// Thread-safe provider registry, keyed by domain.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<String, Arc<dyn ContextProvider>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `device` and `switches` domains with default device info and no switches.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("device", DeviceContextProvider::default());
        registry.register("switches", SwitchContextProvider::default());
        registry
    }

    pub fn register<P: ContextProvider + 'static>(&mut self, domain: impl Into<String>, provider: P) {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(domain.into(), Arc::new(provider));
    }

    pub fn get(&self, domain: &str) -> Option<Arc<dyn ContextProvider>> {
        self.inner.get(domain).cloned()
    }

    pub fn domains(&self) -> Vec<&str> {
        self.inner.keys().map(String::as_str).sorted().collect()
    }

    /// Resolve `selectors` in one batch. Each provider is asked once; the
    /// result is keyed by the full selector. Selectors of unregistered domains
    /// get no entry. Any provider failure fails the whole call.
    pub async fn get_value(&self, selectors: &[String]) -> Result<ActiveValues> {
        let domains = selectors
            .iter()
            .map(|s| split_selector(s).0)
            .unique()
            .collect::<Vec<_>>();

        let mut queries = Vec::new();
        for domain in domains {
            let Some(provider) = self.get(domain) else {
                debug!(domain, "no context provider registered; selectors stay undefined");
                continue;
            };
            let wanted = selectors
                .iter()
                .filter(|s| split_selector(s).0 == domain)
                .collect::<Vec<_>>();
            // A bare domain selector needs the provider's whole value object.
            let wants_all = wanted.iter().any(|s| split_selector(s).1.is_none());
            let keys = if wants_all {
                Vec::new()
            } else {
                wanted
                    .iter()
                    .filter_map(|s| split_selector(s).1)
                    .map(str::to_string)
                    .collect()
            };
            debug!(domain, ?keys, "querying context provider");
            queries.push(async move {
                let values = provider.get_value(&keys).await?;
                Ok::<_, crate::errors::ContextError>((wanted, values))
            });
        }

        let mut out = ActiveValues::new();
        for (wanted, values) in try_join_all(queries).await? {
            for selector in wanted {
                match split_selector(selector).1 {
                    None => {
                        out.insert(selector.clone(), Value::Object(values.clone()));
                    }
                    Some(key) => {
                        if let Some(v) = values.get(key) {
                            out.insert(selector.clone(), v.clone());
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}
