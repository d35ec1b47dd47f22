// src/url.rs
use std::collections::HashMap;
use ::url::form_urlencoded;

/// Query parameter naming explicit context ids, bypassing parameter evaluation.
pub const DESIGN_TIME_CONTEXT_PARAMETER: &str = "sap-ui-flexDesignTimeContext";

/// Query parameter overriding the working layer.
pub const LAYER_PARAMETER: &str = "sap-ui-layer";

/// Read access to the current URL's query parameters.
pub trait UrlParameters: Send + Sync {
    fn get_parameter(&self, name: &str) -> Option<String>;
}

/// No URL at all, e.g. a headless evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUrl;

impl UrlParameters for NoUrl {
    fn get_parameter(&self, _name: &str) -> Option<String> {
        None
    }
}

impl UrlParameters for HashMap<String, String> {
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Parsed `?a=b&c=d` query string. The first occurrence of a name wins.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Accepts a bare query (`a=b`), a query with `?`, or a whole URL.
    pub fn parse(input: &str) -> Self {
        let query = match input.split_once('?') {
            Some((_, q)) => q,
            None => input,
        };
        let query = query.split('#').next().unwrap_or("");

        let pairs = form_urlencoded::parse(query.as_bytes())
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl UrlParameters for QueryString {
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// Ids from the design time context parameter, split on `,` as given.
/// `None` when the parameter is absent or empty; any other value selects
/// the override, even one naming no usable id.
pub fn context_ids_from_url(url: &dyn UrlParameters, parameter: &str) -> Option<Vec<String>> {
    url.get_parameter(parameter)
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.split(',').map(str::to_string).collect())
}
