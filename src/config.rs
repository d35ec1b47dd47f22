use crate::context::ActiveValues;
use crate::errors::{ContextError, Result};
use crate::providers::{DeviceContextProvider, DeviceInfo, Registry, StaticContextProvider, SwitchContextProvider};
use crate::url::DESIGN_TIME_CONTEXT_PARAMETER;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Settings for a [`crate::ContextManager`]. Every field has a default, so
/// `{}` is a valid configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Query parameter carrying explicit context ids.
    pub url_parameter: String,
    /// Layer used for new context objects unless the URL names one.
    pub layer: String,
    /// Original language recorded on new context objects.
    pub language: String,
    pub device: DeviceInfo,
    /// Names of enabled feature switches.
    pub switches: Vec<String>,
    /// Domain -> built-in provider kind (`device`, `switches`, `static`).
    pub providers: BTreeMap<String, String>,
    /// Values served by `static` providers, per domain.
    pub static_values: BTreeMap<String, ActiveValues>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            url_parameter: DESIGN_TIME_CONTEXT_PARAMETER.to_string(),
            layer: "CUSTOMER".to_string(),
            language: "EN".to_string(),
            device: DeviceInfo::default(),
            switches: Vec::new(),
            providers: BTreeMap::from([
                ("device".to_string(), "device".to_string()),
                ("switches".to_string(), "switches".to_string()),
            ]),
            static_values: BTreeMap::new(),
        }
    }
}

impl ManagerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ContextError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ContextError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Instantiate the configured providers.
    pub fn build_registry(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        for (domain, kind) in &self.providers {
            match kind.as_str() {
                "device" => registry.register(domain.clone(), DeviceContextProvider::new(self.device.clone())),
                "switches" => registry.register(domain.clone(), SwitchContextProvider::new(self.switches.clone())),
                "static" => registry.register(
                    domain.clone(),
                    StaticContextProvider::new(self.static_values.get(domain).cloned().unwrap_or_default()),
                ),
                other => {
                    return Err(ContextError::Config(format!(
                        "unknown context provider '{other}' for domain '{domain}'"
                    )))
                }
            }
        }
        Ok(registry)
    }
}
