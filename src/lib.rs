pub mod errors;
pub mod context;
pub mod config;
pub mod engine;     // ContextManager: URL override or provider-backed evaluation
pub mod providers;  // plugin model for runtime context values
pub mod content;
pub mod read_api;
pub mod url;
pub mod matcher;
mod comparison;

pub use config::ManagerConfig;
pub use context::{ActiveValues, Change, ContextDefinition, ContextParameter, Operator};
pub use engine::ContextManager;
pub use errors::{ContextError, Result};
pub use providers::{ContextProvider, Registry};
pub use url::{QueryString, UrlParameters};

/// Re-export the matching rules for callers that already hold the values.
pub use matcher::{evaluate_definition, evaluate_parameter, is_definition_applicable};

/// Convenience: resolve with built-in providers and no URL override.
pub async fn resolve_active_contexts(definitions: &[ContextDefinition]) -> Result<Vec<String>> {
    ContextManager::with_builtins()
        .resolve_active_contexts(definitions)
        .await
}
