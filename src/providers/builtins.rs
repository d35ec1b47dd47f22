use super::ContextProvider;
use crate::context::ActiveValues;
use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

fn pick(all: ActiveValues, keys: &[String]) -> ActiveValues {
    if keys.is_empty() {
        return all;
    }
    keys.iter()
        .filter_map(|k| all.get(k).map(|v| (k.clone(), v.clone())))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSystem {
    Phone,
    Tablet,
    #[default]
    Desktop,
    Combi,
}

/// Static classification of the device the session runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub system: DeviceSystem,
    pub os: String,
    pub browser: String,
    pub touch: bool,
    pub orientation: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            system: DeviceSystem::Desktop,
            os: String::new(),
            browser: String::new(),
            touch: false,
            orientation: "landscape".to_string(),
        }
    }
}

/// Serves `device.*` selectors from a fixed [`DeviceInfo`].
#[derive(Debug, Clone, Default)]
pub struct DeviceContextProvider {
    info: DeviceInfo,
}

impl DeviceContextProvider {
    pub fn new(info: DeviceInfo) -> Self {
        Self { info }
    }
}

#[async_trait]
impl ContextProvider for DeviceContextProvider {
    async fn get_value(&self, keys: &[String]) -> Result<ActiveValues> {
        let all = match serde_json::to_value(&self.info)? {
            Value::Object(m) => m,
            _ => ActiveValues::new(),
        };
        Ok(pick(all, keys))
    }
}

/// Feature switches: a key is `true` when the switch is enabled, `false` otherwise.
#[derive(Debug, Clone, Default)]
pub struct SwitchContextProvider {
    enabled: BTreeSet<String>,
}

impl SwitchContextProvider {
    pub fn new<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ContextProvider for SwitchContextProvider {
    async fn get_value(&self, keys: &[String]) -> Result<ActiveValues> {
        if keys.is_empty() {
            return Ok(self
                .enabled
                .iter()
                .map(|s| (s.clone(), Value::Bool(true)))
                .collect());
        }
        Ok(keys
            .iter()
            .map(|k| (k.clone(), Value::Bool(self.enabled.contains(k))))
            .collect())
    }
}

/// Fixed values, handy for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContextProvider {
    values: ActiveValues,
}

impl StaticContextProvider {
    pub fn new(values: ActiveValues) -> Self {
        Self { values }
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn get_value(&self, keys: &[String]) -> Result<ActiveValues> {
        Ok(pick(self.values.clone(), keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn device_values() {
        let p = DeviceContextProvider::new(DeviceInfo {
            system: DeviceSystem::Phone,
            touch: true,
            ..DeviceInfo::default()
        });
        let out = block_on(p.get_value(&["system".into(), "touch".into(), "nope".into()])).unwrap();
        assert_eq!(Value::Object(out), json!({"system": "phone", "touch": true}));
    }

    #[test]
    fn switches_default_to_false() {
        let p = SwitchContextProvider::new(["a"]);
        let out = block_on(p.get_value(&["a".into(), "b".into()])).unwrap();
        assert_eq!(Value::Object(out), json!({"a": true, "b": false}));
    }
}
