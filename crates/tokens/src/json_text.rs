//! JSON text adapter.
//!
//! Maps token streams to and from JSON text through [`serde_json`]. Object
//! member order is preserved in both directions (`preserve_order`), since
//! decoders must cope with — and tests must be able to express — properties
//! arriving in any order.

use serde_json::Value;
use thiserror::Error;

use crate::error::TokenError;
use crate::raw::RawValue;
use crate::reader::TokenReader;
use crate::token::Token;

#[derive(Debug, Error)]
pub enum JsonTextError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("non-finite float {0} has no JSON text representation")]
    NonFiniteFloat(f64),
    #[error("trailing tokens after the first value")]
    TrailingTokens,
}

/// Renders a token stream holding exactly one value as JSON text.
pub fn to_json_text(tokens: &[Token]) -> Result<String, JsonTextError> {
    let mut reader = TokenReader::new(tokens);
    let raw = reader.read_raw()?;
    if !reader.is_at_end() {
        return Err(JsonTextError::TrailingTokens);
    }
    let value = raw_to_json(&raw)?;
    Ok(serde_json::to_string(&value)?)
}

/// Parses JSON text into a token stream.
pub fn from_json_text(text: &str) -> Result<Vec<Token>, JsonTextError> {
    let value: Value = serde_json::from_str(text)?;
    let raw = json_to_raw(&value);
    Ok(raw.to_tokens()?)
}

/// Converts a captured tree into a [`serde_json::Value`].
pub fn raw_to_json(raw: &RawValue) -> Result<Value, JsonTextError> {
    Ok(match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(value) => Value::Bool(*value),
        RawValue::Int(value) => Value::Number((*value).into()),
        RawValue::Float(value) => serde_json::Number::from_f64(*value)
            .map(Value::Number)
            .ok_or(JsonTextError::NonFiniteFloat(*value))?,
        RawValue::Str(value) => Value::String(value.clone()),
        RawValue::Array(items) => {
            Value::Array(items.iter().map(raw_to_json).collect::<Result<_, _>>()?)
        }
        RawValue::Object(entries) => {
            let mut map = serde_json::Map::new();
            for (key, value) in entries {
                map.insert(key.clone(), raw_to_json(value)?);
            }
            Value::Object(map)
        }
    })
}

/// Converts a [`serde_json::Value`] into a captured tree.
///
/// Integers representable as `i64` stay integers; anything else becomes a
/// float (u64 values above `i64::MAX` lose precision, as they would in any
/// double-based consumer).
pub fn json_to_raw(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => RawValue::Int(i),
            None => RawValue::Float(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => RawValue::Str(s.clone()),
        Value::Array(items) => RawValue::Array(items.iter().map(json_to_raw).collect()),
        Value::Object(map) => RawValue::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_raw(value)))
                .collect(),
        ),
    }
}
