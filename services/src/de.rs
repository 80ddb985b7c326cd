use serde::{
    de::{
        DeserializeOwned,
        Error,
        Unexpected,
    },
    Deserialize,
};
use serde_json::Value;


/// Deserializes `T` only from a JSON object
///
/// Derived struct impls also accept sequences, which a webhook body never legitimately is.
pub fn object<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(de)? {
        value @ Value::Object(_) => T::deserialize(value).map_err(Error::custom),
        other => Err(Error::invalid_type(unexpected(&other), &"a JSON object")),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(Unexpected::Other("number"), Unexpected::Float),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
