use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Current runtime values keyed by full selector, e.g. `device.system`.
pub type ActiveValues = Map<String, Value>;

/// Comparison applied between the runtime value of a selector and the
/// value stored in a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    /// Anything else found in a stored definition. Never matches.
    Unknown(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Unknown(s) => s,
        }
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        match s {
            "EQ" => Operator::Eq,
            "NE" => Operator::Ne,
            other => Operator::Unknown(other.to_string()),
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Non-string operators still load; they just never evaluate to true.
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::String(s) => Operator::from(s.as_str()),
            other => Operator::Unknown(other.to_string()),
        })
    }
}

/// A single predicate: `active[selector] <operator> value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextParameter {
    pub selector: String,
    pub operator: Operator,
    /// `None` when the stored parameter carries no value at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ContextParameter {
    pub fn new(selector: impl Into<String>, operator: impl Into<Operator>, value: Value) -> Self {
        Self {
            selector: selector.into(),
            operator: operator.into(),
            value: Some(value),
        }
    }
}

/// A named runtime condition such as "mobile device" or "switch X enabled".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDefinition {
    pub id: String,
    #[serde(default)]
    pub parameters: Vec<ContextParameter>,
}

impl ContextDefinition {
    pub fn new(id: impl Into<String>, parameters: Vec<ContextParameter>) -> Self {
        Self {
            id: id.into(),
            parameters,
        }
    }
}

/// The part of a flexibility change relevant to context gating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Change {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Change {
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
        }
    }

    /// The required context id, if the change is restricted at all.
    pub fn context_tag(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn operator_strings() {
        let p: ContextParameter =
            serde_json::from_value(json!({"selector": "s", "operator": "NE", "value": 1})).unwrap();
        assert_eq!(p.operator, Operator::Ne);

        let p: ContextParameter =
            serde_json::from_value(json!({"selector": "s", "operator": "LIKE", "value": 1})).unwrap();
        assert_eq!(p.operator, Operator::Unknown("LIKE".into()));
        assert_eq!(serde_json::to_value(&p).unwrap()["operator"], json!("LIKE"));

        let p: ContextParameter =
            serde_json::from_value(json!({"selector": "s", "operator": 7})).unwrap();
        assert_eq!(p.operator, Operator::Unknown("7".into()));
        assert_eq!(p.value, None);
    }

    #[test]
    fn change_tag_ignores_empty() {
        assert_eq!(Change::default().context_tag(), None);
        assert_eq!(Change::with_context("").context_tag(), None);
        assert_eq!(Change::with_context("ctx").context_tag(), Some("ctx"));

        let c: Change = serde_json::from_value(json!({"fileName": "x", "context": "A"})).unwrap();
        assert_eq!(c.context_tag(), Some("A"));
    }
}
