//! Union converter — one algorithm, arity 2 through 4.
//!
//! The central difficulty is order independence: the payload's decode type
//! is unknown until `index` is read, and the wire does not guarantee which
//! property comes first. Decoding therefore runs in two passes — collect
//! every field into a small bag (the index parsed eagerly, the value
//! captured as an untyped tree), then decode the buffered value once the
//! index is known. A single-pass typed reader cannot implement this.

use std::any::Any;

use sumwire_containers::{BuildError, Union2, Union3, Union4};
use sumwire_tokens::{RawValue, TokenReader, TokenWriter};

use crate::constants::{INDEX, VALUE};
use crate::descriptor::{downcast_box, downcast_ref, Family, TypeDescriptor, UnionShape, WireType};
use crate::error::{CodecError, FormatError};
use crate::serializer::{Converter, Serializer};

/// Converter for one concrete union instantiation.
pub struct UnionConverter {
    shape: UnionShape,
}

impl UnionConverter {
    pub(crate) fn new(shape: UnionShape) -> Self {
        Self { shape }
    }

    fn out_of_range(&self, index: i64) -> CodecError {
        FormatError::IndexOutOfRange {
            index,
            max: self.shape.arity - 1,
        }
        .into()
    }
}

impl Converter for UnionConverter {
    fn encode(
        &self,
        value: &dyn Any,
        writer: &mut TokenWriter,
        serializer: &Serializer,
        depth: usize,
    ) -> Result<(), CodecError> {
        // Contract: exactly one alternative is populated per constructed
        // instance; not re-validated here.
        let (index, element) = (self.shape.case)(value)?;
        let element_type = match (self.shape.alternative)(index) {
            Some(descriptor) => descriptor,
            None => return Err(self.out_of_range(index as i64)),
        };
        writer.write_obj_start();
        writer.write_key(INDEX);
        writer.write_int(index as i64);
        writer.write_key(VALUE);
        serializer.encode_dyn(&element_type, element, writer, depth + 1)?;
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
        let mut index: Option<i64> = None;
        let mut raw_value: Option<RawValue> = None;
        while let Some(key) = reader.next_key().map_err(FormatError::from)? {
            match key {
                INDEX => index = Some(reader.read_int().map_err(FormatError::from)?),
                VALUE => raw_value = Some(reader.read_raw().map_err(FormatError::from)?),
                _ => reader.skip_value().map_err(FormatError::from)?,
            }
        }
        let index = index.ok_or(FormatError::MissingProperty { property: INDEX })?;
        let raw = raw_value.ok_or(FormatError::MissingProperty { property: VALUE })?;
        let slot = match usize::try_from(index) {
            Ok(slot) if slot < self.shape.arity => slot,
            _ => return Err(self.out_of_range(index)),
        };
        let element_type = match (self.shape.alternative)(slot) {
            Some(descriptor) => descriptor,
            None => return Err(self.out_of_range(index)),
        };
        let tokens = raw.to_tokens().map_err(FormatError::from)?;
        let mut value_reader = TokenReader::new(&tokens);
        let boxed = serializer.decode_dyn(&element_type, &mut value_reader, depth + 1)?;
        (self.shape.build)(slot, boxed)
    }
}

impl<A: WireType, B: WireType> WireType for Union2<A, B> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::container::<Self>(Family::Union(UnionShape {
            arity: 2,
            alternative: union2_alternative::<A, B>,
            case: union2_case::<A, B>,
            build: union2_build::<A, B>,
        }))
    }
}

fn union2_alternative<A: WireType, B: WireType>(index: usize) -> Option<TypeDescriptor> {
    match index {
        0 => Some(A::descriptor()),
        1 => Some(B::descriptor()),
        _ => None,
    }
}

fn union2_case<A: WireType, B: WireType>(
    value: &dyn Any,
) -> Result<(usize, &dyn Any), CodecError> {
    let union = downcast_ref::<Union2<A, B>>(value)?;
    Ok(match union {
        Union2::First(a) => (0, a as &dyn Any),
        Union2::Second(b) => (1, b as &dyn Any),
    })
}

fn union2_build<A: WireType, B: WireType>(
    index: usize,
    value: Box<dyn Any>,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(match index {
        0 => Box::new(Union2::<A, B>::First(downcast_box::<A>(value)?)),
        1 => Box::new(Union2::<A, B>::Second(downcast_box::<B>(value)?)),
        _ => return Err(BuildError::IndexOutOfRange { index, arity: 2 }.into()),
    })
}

impl<A: WireType, B: WireType, C: WireType> WireType for Union3<A, B, C> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::container::<Self>(Family::Union(UnionShape {
            arity: 3,
            alternative: union3_alternative::<A, B, C>,
            case: union3_case::<A, B, C>,
            build: union3_build::<A, B, C>,
        }))
    }
}

fn union3_alternative<A: WireType, B: WireType, C: WireType>(
    index: usize,
) -> Option<TypeDescriptor> {
    match index {
        0 => Some(A::descriptor()),
        1 => Some(B::descriptor()),
        2 => Some(C::descriptor()),
        _ => None,
    }
}

fn union3_case<A: WireType, B: WireType, C: WireType>(
    value: &dyn Any,
) -> Result<(usize, &dyn Any), CodecError> {
    let union = downcast_ref::<Union3<A, B, C>>(value)?;
    Ok(match union {
        Union3::First(a) => (0, a as &dyn Any),
        Union3::Second(b) => (1, b as &dyn Any),
        Union3::Third(c) => (2, c as &dyn Any),
    })
}

fn union3_build<A: WireType, B: WireType, C: WireType>(
    index: usize,
    value: Box<dyn Any>,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(match index {
        0 => Box::new(Union3::<A, B, C>::First(downcast_box::<A>(value)?)),
        1 => Box::new(Union3::<A, B, C>::Second(downcast_box::<B>(value)?)),
        2 => Box::new(Union3::<A, B, C>::Third(downcast_box::<C>(value)?)),
        _ => return Err(BuildError::IndexOutOfRange { index, arity: 3 }.into()),
    })
}

impl<A: WireType, B: WireType, C: WireType, D: WireType> WireType for Union4<A, B, C, D> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::container::<Self>(Family::Union(UnionShape {
            arity: 4,
            alternative: union4_alternative::<A, B, C, D>,
            case: union4_case::<A, B, C, D>,
            build: union4_build::<A, B, C, D>,
        }))
    }
}

fn union4_alternative<A: WireType, B: WireType, C: WireType, D: WireType>(
    index: usize,
) -> Option<TypeDescriptor> {
    match index {
        0 => Some(A::descriptor()),
        1 => Some(B::descriptor()),
        2 => Some(C::descriptor()),
        3 => Some(D::descriptor()),
        _ => None,
    }
}

fn union4_case<A: WireType, B: WireType, C: WireType, D: WireType>(
    value: &dyn Any,
) -> Result<(usize, &dyn Any), CodecError> {
    let union = downcast_ref::<Union4<A, B, C, D>>(value)?;
    Ok(match union {
        Union4::First(a) => (0, a as &dyn Any),
        Union4::Second(b) => (1, b as &dyn Any),
        Union4::Third(c) => (2, c as &dyn Any),
        Union4::Fourth(d) => (3, d as &dyn Any),
    })
}

fn union4_build<A: WireType, B: WireType, C: WireType, D: WireType>(
    index: usize,
    value: Box<dyn Any>,
) -> Result<Box<dyn Any>, CodecError> {
    Ok(match index {
        0 => Box::new(Union4::<A, B, C, D>::First(downcast_box::<A>(value)?)),
        1 => Box::new(Union4::<A, B, C, D>::Second(downcast_box::<B>(value)?)),
        2 => Box::new(Union4::<A, B, C, D>::Third(downcast_box::<C>(value)?)),
        3 => Box::new(Union4::<A, B, C, D>::Fourth(downcast_box::<D>(value)?)),
        _ => return Err(BuildError::IndexOutOfRange { index, arity: 4 }.into()),
    })
}
