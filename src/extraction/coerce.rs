//! Leaf readers shared by every extraction strategy.
//!
//! Feeds mix representations between dataset versions: the same reading can
//! arrive as a bare scalar, as a value-object (`{"value": ..}`) or as a list of
//! value-objects. [`coerce_scalar`] collapses all three shapes so that the
//! strategies never repeat ad hoc type checks.

use serde_json::Value;

/// Keys holding the payload of a value-object, in lookup order.
pub(crate) const VALUE_KEYS: &[&str] = &["elementValue", "value", "parameter", "parameterName"];

/// Resolves a list / object / scalar leaf down to a scalar.
///
/// * list: the first entry is resolved
/// * object: the first present key from `value_keys` is resolved
/// * scalar: returned as is
///
/// `null` and empty containers resolve to `None`.
pub(crate) fn coerce_scalar<'a>(value: &'a Value, value_keys: &[&str]) -> Option<&'a Value> {
    match value {
        Value::Array(items) => items
            .first()
            .and_then(|first| coerce_scalar(first, value_keys)),
        Value::Object(map) => value_keys
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(|inner| coerce_scalar(inner, value_keys)),
        Value::Null => None,
        scalar => Some(scalar),
    }
}

/// Integer, float or numeric string to a finite `f64`. Anything else is `None`.
pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// String (kept verbatim), integer or float (stringified). Blank strings are `None`.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a temperature-like leaf through [`coerce_scalar`].
pub(crate) fn read_f64(value: &Value, value_keys: &[&str]) -> Option<f64> {
    coerce_scalar(value, value_keys).and_then(as_f64)
}

/// Reads a descriptive leaf through [`coerce_scalar`].
pub(crate) fn read_text(value: &Value, value_keys: &[&str]) -> Option<String> {
    coerce_scalar(value, value_keys).and_then(as_text)
}

/// First of `keys` on `object` that yields text. Non-objects yield `None`.
pub(crate) fn text_field(object: &Value, keys: &[&str]) -> Option<String> {
    let map = object.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(|v| read_text(v, VALUE_KEYS))
}

/// First of `keys` on `object` that yields a finite number.
pub(crate) fn number_field(object: &Value, keys: &[&str]) -> Option<f64> {
    let map = object.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(|v| read_f64(v, VALUE_KEYS))
}

/// Non-empty array of objects under `key`, with non-object entries dropped.
pub(crate) fn object_list<'a>(container: &'a Value, key: &str) -> Option<Vec<&'a Value>> {
    as_object_list(container.get(key)?)
}

/// `value` as a list of objects, if it is an array holding at least one.
pub(crate) fn as_object_list(value: &Value) -> Option<Vec<&Value>> {
    let objects: Vec<&Value> = value
        .as_array()?
        .iter()
        .filter(|item| item.is_object())
        .collect();
    (!objects.is_empty()).then_some(objects)
}
