use serde_json::Value;

/// Strict equality between a runtime value and a stored value.
/// `None` on either side stands for "undefined" and only equals another `None`.
pub fn strict_equals(active: Option<&Value>, expected: Option<&Value>) -> bool {
    match (active, expected) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    // No cross-type coercion: "1" is not 1 and null is not false
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => {
            if let (Some(da), Some(db)) = (na.as_f64(), nb.as_f64()) {
                da == db
            } else {
                na == nb
            }
        }
        (Value::Array(xa), Value::Array(xb)) => {
            xa.len() == xb.len() && xa.iter().zip(xb).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(ma), Value::Object(mb)) => {
            ma.len() == mb.len()
                && ma
                    .iter()
                    .all(|(k, v)| mb.get(k).map(|w| values_equal(v, w)).unwrap_or(false))
        }
        _ => a == b,
    }
}
