use crate::config::ManagerConfig;
use crate::content::{Connector, ContextObject, ContextObjectRequest, Method};
use crate::context::{Change, ContextDefinition};
use crate::errors::Result;
use crate::matcher;
use crate::providers::Registry;
use crate::url::{context_ids_from_url, NoUrl, UrlParameters, DESIGN_TIME_CONTEXT_PARAMETER, LAYER_PARAMETER};
use itertools::Itertools;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// =========================
/// Public API (ContextManager)
/// =========================

/// Decides which context definitions are active for the running session.
/// Holds no mutable state; concurrent calls are independent.
#[derive(Clone)]
pub struct ContextManager {
    providers: Registry,
    url: Arc<dyn UrlParameters>,
    url_parameter: String,
    layer: String,
    language: String,
}

impl ContextManager {
    pub fn new(providers: Registry, url: Arc<dyn UrlParameters>) -> Self {
        let defaults = ManagerConfig::default();
        Self {
            providers,
            url,
            url_parameter: DESIGN_TIME_CONTEXT_PARAMETER.to_string(),
            layer: defaults.layer,
            language: defaults.language,
        }
    }

    /// Built-in providers, no URL.
    pub fn with_builtins() -> Self {
        Self::new(Registry::with_builtins(), Arc::new(NoUrl))
    }

    pub fn from_config(config: &ManagerConfig, url: Arc<dyn UrlParameters>) -> Result<Self> {
        Ok(Self {
            providers: config.build_registry()?,
            url,
            url_parameter: config.url_parameter.clone(),
            layer: config.layer.clone(),
            language: config.language.clone(),
        })
    }

    /// See [`matcher::is_definition_applicable`].
    pub fn does_context_match(&self, change: &Change, active_context_ids: &[String]) -> bool {
        matcher::is_definition_applicable(change, active_context_ids)
    }

    /// Ids of the active definitions, in input order.
    ///
    /// Explicit ids in the URL take precedence and skip the providers
    /// entirely. Otherwise every distinct selector is resolved in one
    /// provider query and the definitions are evaluated against the result.
    pub async fn resolve_active_contexts(&self, definitions: &[ContextDefinition]) -> Result<Vec<String>> {
        if let Some(url_ids) = context_ids_from_url(self.url.as_ref(), &self.url_parameter) {
            debug!(ids = ?url_ids, "active contexts taken from URL");
            return Ok(matcher::active_by_ids(definitions, &url_ids));
        }

        let selectors = definitions
            .iter()
            .flat_map(|d| d.parameters.iter().map(|p| p.selector.clone()))
            .unique()
            .collect::<Vec<_>>();
        debug!(?selectors, "evaluating context parameters");
        let values = self.providers.get_value(&selectors).await?;
        Ok(matcher::active_by_parameters(definitions, &values))
    }

    /// Layer for new content: the URL's `sap-ui-layer`, else the configured one.
    pub fn current_layer(&self) -> String {
        self.url
            .get_parameter(LAYER_PARAMETER)
            .filter(|l| !l.is_empty())
            .map(|l| l.to_uppercase())
            .unwrap_or_else(|| self.layer.clone())
    }

    /// Complete `request` and write it to the repository with a `PUT`.
    /// Returns whatever the connector answered.
    pub async fn create_or_update_context_object(
        &self,
        connector: &dyn Connector,
        request: ContextObjectRequest,
    ) -> Result<Value> {
        let object = ContextObject::from_request(request, &self.current_layer(), &self.language)?;
        let url = object.content_url();
        debug!(%url, method = %Method::Put, id = %object.id, "writing context object");
        let payload = serde_json::to_value(&object)?;
        connector.send(&url, Method::Put, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextParameter;
    use crate::providers::{DeviceContextProvider, DeviceInfo, DeviceSystem};
    use crate::url::QueryString;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn phone_manager(query: &str) -> ContextManager {
        let mut reg = Registry::new();
        reg.register(
            "device",
            DeviceContextProvider::new(DeviceInfo {
                system: DeviceSystem::Phone,
                ..DeviceInfo::default()
            }),
        );
        ContextManager::new(reg, Arc::new(QueryString::parse(query)))
    }

    fn definitions() -> Vec<ContextDefinition> {
        vec![
            ContextDefinition::new("A", vec![ContextParameter::new("device.system", "EQ", json!("phone"))]),
            ContextDefinition::new("B", vec![]),
            ContextDefinition::new("C", vec![ContextParameter::new("device.system", "EQ", json!("tablet"))]),
        ]
    }

    #[test]
    fn evaluates_parameters() {
        let out = block_on(phone_manager("").resolve_active_contexts(&definitions())).unwrap();
        assert_eq!(out, vec!["A", "B"]);
    }

    #[test]
    fn url_override() {
        let out = block_on(phone_manager("?sap-ui-flexDesignTimeContext=C").resolve_active_contexts(&definitions()))
            .unwrap();
        assert_eq!(out, vec!["C"]);
    }

    #[test]
    fn separators_alone_still_override() {
        let out = block_on(phone_manager("sap-ui-flexDesignTimeContext=,").resolve_active_contexts(&definitions()))
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn layer_from_url() {
        assert_eq!(phone_manager("sap-ui-layer=vendor").current_layer(), "VENDOR");
        assert_eq!(phone_manager("").current_layer(), "CUSTOMER");
    }
}
