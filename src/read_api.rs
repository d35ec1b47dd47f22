//! Read-only facades over the older personalization API. They add nothing
//! but a narrower surface; every call is forwarded unchanged.

use crate::errors::Result;
use async_trait::async_trait;

/// The older personalization API the facades delegate to.
#[async_trait]
pub trait PersonalizationBackend: Send + Sync {
    /// Whether any of `controls` carries personalization changes, optionally
    /// restricted to `change_types`.
    async fn is_personalized(&self, controls: &[String], change_types: &[String]) -> Result<bool>;

    fn clear_variant_parameter_in_url(&self, control: &str);

    async fn activate_variant(&self, element: &str, variant_reference: &str) -> Result<()>;

    fn has_variant_management(&self, control: &str) -> bool;
}

/// Personalization state of controls.
pub struct ControlPersonalizationReadApi<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: PersonalizationBackend + ?Sized> ControlPersonalizationReadApi<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn is_personalized(&self, controls: &[String], change_types: &[String]) -> Result<bool> {
        self.backend.is_personalized(controls, change_types).await
    }
}

/// Variant management of controls.
pub struct ControlVariantReadApi<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: PersonalizationBackend + ?Sized> ControlVariantReadApi<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn clear_variant_parameter_in_url(&self, control: &str) {
        self.backend.clear_variant_parameter_in_url(control)
    }

    pub async fn activate_variant(&self, element: &str, variant_reference: &str) -> Result<()> {
        self.backend.activate_variant(element, variant_reference).await
    }

    pub fn has_variant_management(&self, control: &str) -> bool {
        self.backend.has_variant_management(control)
    }
}
