use crate::error::TokenError;
use crate::token::Token;
use crate::writer::TokenWriter;

/// Maximum nesting depth accepted when capturing or replaying a value.
pub const MAX_DEPTH: usize = 128;

/// Untyped value tree.
///
/// Used wherever a value must be held before its static type is known: a
/// union payload read ahead of its index, or reason tag values, whose
/// original static types cannot be recovered from the wire. Object entries
/// keep wire order.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<RawValue>),
    Object(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Replays this tree into `writer` as a token sequence.
    pub fn write_into(&self, writer: &mut TokenWriter) -> Result<(), TokenError> {
        self.write_at(writer, 0)
    }

    fn write_at(&self, writer: &mut TokenWriter, depth: usize) -> Result<(), TokenError> {
        if depth >= MAX_DEPTH {
            return Err(TokenError::DepthExceeded(MAX_DEPTH));
        }
        match self {
            RawValue::Null => writer.write_null(),
            RawValue::Bool(value) => writer.write_bool(*value),
            RawValue::Int(value) => writer.write_int(*value),
            RawValue::Float(value) => writer.write_float(*value),
            RawValue::Str(value) => writer.write_str(value.as_str()),
            RawValue::Array(items) => {
                writer.write_arr_start();
                for item in items {
                    item.write_at(writer, depth + 1)?;
                }
                writer.write_arr_end();
            }
            RawValue::Object(entries) => {
                writer.write_obj_start();
                for (key, value) in entries {
                    writer.write_key(key.as_str());
                    value.write_at(writer, depth + 1)?;
                }
                writer.write_obj_end();
            }
        }
        Ok(())
    }

    /// Renders this tree as a standalone token stream.
    pub fn to_tokens(&self) -> Result<Vec<Token>, TokenError> {
        let mut writer = TokenWriter::new();
        self.write_into(&mut writer)?;
        Ok(writer.into_tokens())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(value as i64)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Str(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::TokenReader;

    #[test]
    fn capture_then_replay_is_identity() {
        let raw = RawValue::Object(vec![
            ("n".to_owned(), RawValue::Null),
            ("xs".to_owned(), RawValue::Array(vec![RawValue::Int(1), RawValue::Str("s".to_owned())])),
        ]);
        let tokens = raw.to_tokens().unwrap();
        let mut r = TokenReader::new(&tokens);
        assert_eq!(r.read_raw().unwrap(), raw);
    }

    #[test]
    fn replay_rejects_excessive_nesting() {
        let mut raw = RawValue::Null;
        for _ in 0..(MAX_DEPTH + 1) {
            raw = RawValue::Array(vec![raw]);
        }
        assert_eq!(raw.to_tokens(), Err(TokenError::DepthExceeded(MAX_DEPTH)));
    }
}
