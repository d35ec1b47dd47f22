use crate::context::ContextParameter;
use crate::errors::{ContextError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Request methods the repository writes use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Put => "PUT",
        })
    }
}

/// Transport to the layered content repository. Implementations own the
/// HTTP details; failures should be reported as [`ContextError::Transport`].
#[async_trait]
pub trait Connector: Send + Sync {
    async fn send(&self, url: &str, method: Method, payload: &Value) -> Result<Value>;
}

/// Caller input for creating or updating a context object. Only
/// `reference` and `namespace` are mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextObjectRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Vec<ContextParameter>>,
    pub reference: Option<String>,
    pub package_name: Option<String>,
    pub layer: Option<String>,
    pub namespace: Option<String>,
    pub creation: Option<String>,
    pub original_language: Option<String>,
    pub support: Option<Support>,
    pub generator: Option<String>,
    pub valid_app_versions: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Support {
    pub generator: String,
    pub service: String,
    pub user: String,
}

/// A stored context definition together with its repository metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextObject {
    pub id: String,
    pub file_name: String,
    pub title: String,
    pub description: String,
    pub parameters: Vec<ContextParameter>,
    pub file_type: String,
    pub reference: String,
    pub package_name: String,
    pub layer: String,
    pub namespace: String,
    pub creation: String,
    pub original_language: String,
    pub support: Support,
    pub valid_app_versions: Map<String, Value>,
}

impl ContextObject {
    /// Fill the defaults of `request`. `layer` and `language` are used when
    /// the request names none.
    pub fn from_request(request: ContextObjectRequest, layer: &str, language: &str) -> Result<Self> {
        let reference = request
            .reference
            .filter(|r| !r.is_empty())
            .ok_or(ContextError::MissingField("reference"))?;
        let namespace = request
            .namespace
            .filter(|n| !n.is_empty())
            .ok_or(ContextError::MissingField("namespace"))?;
        let id = request
            .id
            .filter(|i| !i.is_empty())
            .unwrap_or_else(default_file_name);
        let support = request.support.unwrap_or_else(|| Support {
            generator: request.generator.unwrap_or_default(),
            ..Support::default()
        });

        Ok(Self {
            file_name: id.clone(),
            id,
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            parameters: request.parameters.unwrap_or_default(),
            file_type: "context".to_string(),
            reference,
            package_name: request.package_name.unwrap_or_default(),
            layer: request
                .layer
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| layer.to_string()),
            namespace,
            creation: request.creation.unwrap_or_default(),
            original_language: request
                .original_language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| language.to_string()),
            support,
            valid_app_versions: request.valid_app_versions.unwrap_or_default(),
        })
    }

    /// Repository path the object is written to.
    pub fn content_url(&self) -> String {
        format!(
            "/sap/bc/lrep/content/{}{}.context?layer={}",
            self.namespace, self.file_name, self.layer
        )
    }
}

/// `id_` followed by a random hex token.
pub fn default_file_name() -> String {
    format!("id_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request(v: Value) -> ContextObjectRequest {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn defaults_are_filled() {
        let obj = ContextObject::from_request(
            request(json!({"reference": "app.ref", "namespace": "apps/app/contexts/", "generator": "tool"})),
            "CUSTOMER",
            "DE",
        )
        .unwrap();
        assert!(obj.id.starts_with("id_"));
        assert_eq!(obj.file_name, obj.id);
        assert_eq!(obj.file_type, "context");
        assert_eq!(obj.layer, "CUSTOMER");
        assert_eq!(obj.original_language, "DE");
        assert_eq!(obj.support.generator, "tool");
        assert!(obj.parameters.is_empty());
    }

    #[test]
    fn explicit_values_win() {
        let obj = ContextObject::from_request(
            request(json!({
                "id": "mobile",
                "reference": "r",
                "namespace": "ns/",
                "layer": "VENDOR",
                "parameters": [{"selector": "device.system", "operator": "EQ", "value": "phone"}]
            })),
            "CUSTOMER",
            "EN",
        )
        .unwrap();
        assert_eq!(obj.content_url(), "/sap/bc/lrep/content/ns/mobile.context?layer=VENDOR");
        assert_eq!(obj.parameters.len(), 1);

        let wire = serde_json::to_value(&obj).unwrap();
        assert_eq!(wire["fileName"], json!("mobile"));
        assert_eq!(wire["validAppVersions"], json!({}));
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn required_fields() {
        let err = ContextObject::from_request(request(json!({"namespace": "ns/"})), "CUSTOMER", "EN").unwrap_err();
        assert_eq!(err.to_string(), "no reference passed for the context object");
        let err = ContextObject::from_request(request(json!({"reference": "r"})), "CUSTOMER", "EN").unwrap_err();
        assert!(matches!(err, ContextError::MissingField("namespace")));
    }
}
