//! Maybe converter.

use std::any::Any;

use sumwire_containers::Maybe;
use sumwire_tokens::{RawValue, TokenReader, TokenWriter};

use crate::constants::{HAS_VALUE, VALUE};
use crate::descriptor::{downcast_box, downcast_ref, Family, MaybeShape, TypeDescriptor, WireType};
use crate::error::{CodecError, FormatError};
use crate::serializer::{Converter, Serializer};

/// Converter for one concrete `Maybe<T>` instantiation.
pub struct MaybeConverter {
    shape: MaybeShape,
}

impl MaybeConverter {
    pub(crate) fn new(shape: MaybeShape) -> Self {
        Self { shape }
    }
}

impl Converter for MaybeConverter {
    fn encode(
        &self,
        value: &dyn Any,
        writer: &mut TokenWriter,
        serializer: &Serializer,
        depth: usize,
    ) -> Result<(), CodecError> {
        let element = (self.shape.value)(value)?;
        writer.write_obj_start();
        writer.write_key(HAS_VALUE);
        writer.write_bool(element.is_some());
        // The value property is omitted entirely when absent — not written
        // as null — so absence stays distinguishable from a present null.
        if let Some(element) = element {
            writer.write_key(VALUE);
            serializer.encode_dyn(&(self.shape.value_type)(), element, writer, depth + 1)?;
        }
        writer.write_obj_end();
        Ok(())
    }

    fn decode(
        &self,
        reader: &mut TokenReader<'_>,
        serializer: &Serializer,
        depth: usize,
    ) -> Result<Box<dyn Any>, CodecError> {
        reader.expect_obj_start().map_err(FormatError::from)?;
        let mut has_value: Option<bool> = None;
        let mut raw_value: Option<RawValue> = None;
        while let Some(key) = reader.next_key().map_err(FormatError::from)? {
            match key {
                HAS_VALUE => {
                    has_value = Some(reader.read_bool().map_err(FormatError::from)?);
                }
                VALUE => {
                    raw_value = Some(reader.read_raw().map_err(FormatError::from)?);
                }
                _ => reader.skip_value().map_err(FormatError::from)?,
            }
        }
        let has_value = has_value.ok_or(FormatError::MissingDiscriminant {
            property: HAS_VALUE,
        })?;
        if !has_value {
            // hasValue=false always wins; an accompanying value property is
            // dropped, not merged.
            return (self.shape.build)(None);
        }
        let raw = raw_value.ok_or(FormatError::MissingValue)?;
        let tokens = raw.to_tokens().map_err(FormatError::from)?;
        let mut value_reader = TokenReader::new(&tokens);
        let boxed =
            serializer.decode_dyn(&(self.shape.value_type)(), &mut value_reader, depth + 1)?;
        (self.shape.build)(Some(boxed))
    }
}

impl<T: WireType> WireType for Maybe<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::container::<Self>(Family::Maybe(MaybeShape {
            value_type: T::descriptor,
            value: maybe_value::<T>,
            build: build_maybe::<T>,
        }))
    }
}

fn maybe_value<T: WireType>(value: &dyn Any) -> Result<Option<&dyn Any>, CodecError> {
    let maybe = downcast_ref::<Maybe<T>>(value)?;
    Ok(maybe.value().map(|v| v as &dyn Any))
}

fn build_maybe<T: WireType>(value: Option<Box<dyn Any>>) -> Result<Box<dyn Any>, CodecError> {
    Ok(match value {
        Some(boxed) => Box::new(Maybe::Present(downcast_box::<T>(boxed)?)),
        None => Box::new(Maybe::<T>::Absent),
    })
}
