use serde_json::{Map, Value};

/// Read-only view over a decoded JSON object.
///
/// Every accessor returns `None` both when the key is absent and when the
/// value has an unexpected type, so callers never have to distinguish the two.
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a>(&'a Map<String, Value>);

/// Views `value` as an object, or `None` for any other JSON type.
pub fn as_object(value: &Value) -> Option<JsonObject<'_>> {
    value.as_object().map(JsonObject)
}

impl<'a> JsonObject<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Accepts both integer-encoded and whole-valued float-encoded numbers,
    /// so `1500` and `1500.0` read back as the same value.
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(integer_value)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_object(&self, key: &str) -> Option<JsonObject<'a>> {
        self.get(key).and_then(as_object)
    }

    pub fn get_array(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// True when the `_class` discriminator equals `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_string("_class") == Some(class)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.0.iter()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integer_value(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(i) = number.as_i64() {
        return Some(i);
    }

    if number.is_u64() {
        return None;
    }

    let f = number.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
