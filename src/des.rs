//! Deserializers for the fields of the 12306 reply.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// The service writes the numbers of seats either as strings or as numbers,
// missing values are `null`.
pub fn des_to_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a text field, found {}",
            other
        ))),
    }
}
