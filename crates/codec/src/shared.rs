//! Shared convenience wrappers for one-call encode/decode.

use sumwire_tokens::{from_json_text, to_json_text, Token, TokenReader, TokenWriter};

use crate::descriptor::WireType;
use crate::error::CodecError;
use crate::serializer::Serializer;

/// Encode a value into a standalone token stream.
pub fn encode_to_tokens<T: WireType>(
    serializer: &Serializer,
    value: &T,
) -> Result<Vec<Token>, CodecError> {
    let mut writer = TokenWriter::new();
    serializer.encode(value, &mut writer)?;
    Ok(writer.into_tokens())
}

/// Decode a value from a token stream.
pub fn decode_from_tokens<T: WireType>(
    serializer: &Serializer,
    tokens: &[Token],
) -> Result<T, CodecError> {
    let mut reader = TokenReader::new(tokens);
    serializer.decode(&mut reader)
}

/// Encode a value as JSON text.
pub fn encode_to_json<T: WireType>(
    serializer: &Serializer,
    value: &T,
) -> Result<String, CodecError> {
    let tokens = encode_to_tokens(serializer, value)?;
    Ok(to_json_text(&tokens)?)
}

/// Decode a value from JSON text.
pub fn decode_from_json<T: WireType>(
    serializer: &Serializer,
    text: &str,
) -> Result<T, CodecError> {
    let tokens = from_json_text(text)?;
    decode_from_tokens(serializer, &tokens)
}
