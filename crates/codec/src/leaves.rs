//! Leaf codecs for element types.
//!
//! Scalars, strings, nullable elements (`Option<T>`), sequences (`Vec<T>`),
//! and pre-captured [`RawValue`] trees. Containers are deliberately not
//! handled here: their descriptors route through the converter factories.

use std::any::Any;

use sumwire_tokens::{RawValue, Token, TokenReader, TokenWriter};

use crate::descriptor::{downcast_box, downcast_ref, LeafCodec, TypeDescriptor, WireType};
use crate::error::{CodecError, FormatError};
use crate::serializer::Serializer;

impl WireType for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_bool,
            decode: decode_bool,
        })
    }
}

fn encode_bool(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    writer.write_bool(*downcast_ref::<bool>(value)?);
    Ok(())
}

fn decode_bool(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(Box::new(reader.read_bool()?))
}

impl WireType for i64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_i64,
            decode: decode_i64,
        })
    }
}

fn encode_i64(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    writer.write_int(*downcast_ref::<i64>(value)?);
    Ok(())
}

fn decode_i64(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(Box::new(reader.read_int()?))
}

impl WireType for i32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_i32,
            decode: decode_i32,
        })
    }
}

fn encode_i32(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    writer.write_int(i64::from(*downcast_ref::<i32>(value)?));
    Ok(())
}

fn decode_i32(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    let wide = reader.read_int()?;
    let narrow =
        i32::try_from(wide).map_err(|_| FormatError::IntOutOfRange(wide, "i32"))?;
    Ok(Box::new(narrow))
}

impl WireType for u32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_u32,
            decode: decode_u32,
        })
    }
}

fn encode_u32(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    writer.write_int(i64::from(*downcast_ref::<u32>(value)?));
    Ok(())
}

fn decode_u32(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    let wide = reader.read_int()?;
    let narrow =
        u32::try_from(wide).map_err(|_| FormatError::IntOutOfRange(wide, "u32"))?;
    Ok(Box::new(narrow))
}

impl WireType for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_f64,
            decode: decode_f64,
        })
    }
}

fn encode_f64(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    writer.write_float(*downcast_ref::<f64>(value)?);
    Ok(())
}

fn decode_f64(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(Box::new(reader.read_float()?))
}

impl WireType for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_string,
            decode: decode_string,
        })
    }
}

fn encode_string(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    writer.write_str(downcast_ref::<String>(value)?.as_str());
    Ok(())
}

fn decode_string(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(Box::new(reader.read_str()?.to_owned()))
}

impl WireType for RawValue {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_raw,
            decode: decode_raw,
        })
    }
}

fn encode_raw(
    value: &dyn Any,
    writer: &mut TokenWriter,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<(), CodecError> {
    downcast_ref::<RawValue>(value)?.write_into(writer)?;
    Ok(())
}

fn decode_raw(
    reader: &mut TokenReader<'_>,
    _serializer: &Serializer,
    _depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(Box::new(reader.read_raw()?))
}

/// Nullable element type: `None` encodes as a null scalar, `Some` as the
/// inner value. Distinct from [`Maybe`](sumwire_containers::Maybe), which
/// carries its own wire discriminant.
impl<T: WireType> WireType for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_option::<T>,
            decode: decode_option::<T>,
        })
    }
}

fn encode_option<T: WireType>(
    value: &dyn Any,
    writer: &mut TokenWriter,
    serializer: &Serializer,
    depth: usize,
) -> Result<(), CodecError> {
    match downcast_ref::<Option<T>>(value)? {
        Some(inner) => serializer.encode_dyn(&T::descriptor(), inner, writer, depth + 1),
        None => {
            writer.write_null();
            Ok(())
        }
    }
}

fn decode_option<T: WireType>(
    reader: &mut TokenReader<'_>,
    serializer: &Serializer,
    depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    if matches!(reader.peek(), Some(Token::Null)) {
        reader.read_null()?;
        return Ok(Box::new(None::<T>));
    }
    let boxed = serializer.decode_dyn(&T::descriptor(), reader, depth + 1)?;
    Ok(Box::new(Some(downcast_box::<T>(boxed)?)))
}

impl<T: WireType> WireType for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf::<Self>(LeafCodec {
            encode: encode_vec::<T>,
            decode: decode_vec::<T>,
        })
    }
}

fn encode_vec<T: WireType>(
    value: &dyn Any,
    writer: &mut TokenWriter,
    serializer: &Serializer,
    depth: usize,
) -> Result<(), CodecError> {
    let items = downcast_ref::<Vec<T>>(value)?;
    writer.write_arr_start();
    for item in items {
        serializer.encode_dyn(&T::descriptor(), item, writer, depth + 1)?;
    }
    writer.write_arr_end();
    Ok(())
}

fn decode_vec<T: WireType>(
    reader: &mut TokenReader<'_>,
    serializer: &Serializer,
    depth: usize,
) -> Result<Box<dyn Any>, CodecError> {
    reader.expect_arr_start()?;
    let mut items = Vec::new();
    while reader.arr_has_next()? {
        let boxed = serializer.decode_dyn(&T::descriptor(), reader, depth + 1)?;
        items.push(downcast_box::<T>(boxed)?);
    }
    Ok(Box::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: WireType + PartialEq + std::fmt::Debug + Clone>(value: &T) {
        let serializer = Serializer::new();
        let mut writer = TokenWriter::new();
        serializer.encode(value, &mut writer).expect("encode");
        let tokens = writer.into_tokens();
        let mut reader = TokenReader::new(&tokens);
        let back: T = serializer.decode(&mut reader).expect("decode");
        assert_eq!(back, *value);
    }

    #[test]
    fn leaf_roundtrip_matrix() {
        roundtrip(&true);
        roundtrip(&42i64);
        roundtrip(&-3i32);
        roundtrip(&7u32);
        roundtrip(&2.5f64);
        roundtrip(&"hello".to_owned());
        roundtrip(&Some(5i32));
        roundtrip(&None::<i32>);
        roundtrip(&vec![1i64, 2, 3]);
        roundtrip(&RawValue::Array(vec![RawValue::Null, RawValue::Int(1)]));
    }

    #[test]
    fn i32_decode_rejects_overflow() {
        let serializer = Serializer::new();
        let tokens = vec![Token::Int(i64::from(i32::MAX) + 1)];
        let mut reader = TokenReader::new(&tokens);
        let result: Result<i32, _> = serializer.decode(&mut reader);
        assert!(matches!(
            result,
            Err(CodecError::Format(FormatError::IntOutOfRange(_, "i32")))
        ));
    }

    #[test]
    fn option_null_and_value_are_distinct() {
        let serializer = Serializer::new();
        let mut writer = TokenWriter::new();
        serializer.encode(&None::<i32>, &mut writer).expect("encode");
        assert_eq!(writer.into_tokens(), vec![Token::Null]);
    }
}
