use crate::comparison::strict_equals;
use crate::context::{ActiveValues, Change, ContextDefinition, ContextParameter, Operator};
use tracing::info;

/// True when `change` applies given the currently active context ids.
/// A change without a context tag applies unconditionally.
pub fn is_definition_applicable(change: &Change, active_context_ids: &[String]) -> bool {
    match change.context_tag() {
        None => true,
        Some(tag) => active_context_ids.iter().any(|id| id == tag),
    }
}

/// Evaluate one predicate against the active values.
/// Unrecognized operators are logged and never match.
pub fn evaluate_parameter(parameter: &ContextParameter, active: &ActiveValues) -> bool {
    let current = active.get(&parameter.selector);
    match &parameter.operator {
        Operator::Eq => strict_equals(current, parameter.value.as_ref()),
        Operator::Ne => !strict_equals(current, parameter.value.as_ref()),
        Operator::Unknown(op) => {
            info!(
                operator = %op,
                selector = %parameter.selector,
                "A context within a flexibility change with the operator '{}' could not be verified",
                op
            );
            false
        }
    }
}

/// Logical AND over all parameters, stopping at the first miss.
/// A definition without parameters is always active.
pub fn evaluate_definition(definition: &ContextDefinition, active: &ActiveValues) -> bool {
    definition
        .parameters
        .iter()
        .all(|p| evaluate_parameter(p, active))
}

/// Ids of the definitions active under `active`, in input order.
pub fn active_by_parameters(definitions: &[ContextDefinition], active: &ActiveValues) -> Vec<String> {
    definitions
        .iter()
        .filter(|d| evaluate_definition(d, active))
        .map(|d| d.id.clone())
        .collect()
}

/// Ids of the definitions named in an explicit override list, in input order.
pub fn active_by_ids(definitions: &[ContextDefinition], ids: &[String]) -> Vec<String> {
    definitions
        .iter()
        .filter(|d| ids.contains(&d.id))
        .map(|d| d.id.clone())
        .collect()
}
