//! Runtime type descriptors.
//!
//! The serializer never inspects a value structurally; it dispatches on the
//! descriptor the value's static type reports. Container descriptors carry
//! monomorphized hooks (accessors and constructors generated per concrete
//! instantiation), which is how one converter per instantiation is produced
//! at runtime without reflection.

use std::any::{Any, TypeId};

use sumwire_containers::{FaultReason, Success};
use sumwire_tokens::{TokenReader, TokenWriter};

use crate::error::CodecError;
use crate::serializer::Serializer;

/// Erased encode hook of a leaf type.
pub type EncodeFn =
    fn(&dyn Any, &mut TokenWriter, &Serializer, usize) -> Result<(), CodecError>;
/// Erased decode hook of a leaf type.
pub type DecodeFn =
    fn(&mut TokenReader<'_>, &Serializer, usize) -> Result<Box<dyn Any>, CodecError>;

/// Every encodable type reports a descriptor; the serializer routes on it.
pub trait WireType: Any + Sized {
    fn descriptor() -> TypeDescriptor;
}

/// Runtime description of an encodable type.
#[derive(Clone)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    family: Family,
}

impl TypeDescriptor {
    /// Descriptor for an element type handled by its own codec.
    pub fn leaf<T: Any>(codec: LeafCodec) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            family: Family::Leaf(codec),
        }
    }

    /// Descriptor for a container family instantiation.
    pub fn container<T: Any>(family: Family) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            family,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn family(&self) -> &Family {
        &self.family
    }
}

/// Which of the supported shapes a descriptor instantiates.
#[derive(Clone)]
pub enum Family {
    Leaf(LeafCodec),
    Outcome(OutcomeShape),
    Maybe(MaybeShape),
    Union(UnionShape),
}

/// Encode/decode hooks of a leaf type.
#[derive(Clone, Copy)]
pub struct LeafCodec {
    pub encode: EncodeFn,
    pub decode: DecodeFn,
}

/// Borrowed view of one concrete outcome, produced by its erased accessor.
pub struct OutcomeParts<'a> {
    pub is_success: bool,
    pub value: Option<&'a dyn Any>,
    pub faults: &'a [Box<dyn FaultReason>],
    pub successes: &'a [Success],
}

/// Hooks binding an `Outcome<T>` instantiation to the erased converter.
#[derive(Clone, Copy)]
pub struct OutcomeShape {
    pub value_type: fn() -> TypeDescriptor,
    pub parts: fn(&dyn Any) -> Result<OutcomeParts<'_>, CodecError>,
    pub build: fn(
        Option<Box<dyn Any>>,
        Vec<Box<dyn FaultReason>>,
        Vec<Success>,
    ) -> Result<Box<dyn Any>, CodecError>,
}

/// Hooks binding a `Maybe<T>` instantiation to the erased converter.
#[derive(Clone, Copy)]
pub struct MaybeShape {
    pub value_type: fn() -> TypeDescriptor,
    /// `Ok(None)` means absent.
    pub value: fn(&dyn Any) -> Result<Option<&dyn Any>, CodecError>,
    pub build: fn(Option<Box<dyn Any>>) -> Result<Box<dyn Any>, CodecError>,
}

/// Hooks binding a union instantiation to the erased converter.
#[derive(Clone, Copy)]
pub struct UnionShape {
    pub arity: usize,
    /// Element type of one alternative slot; `None` when out of range.
    pub alternative: fn(usize) -> Option<TypeDescriptor>,
    /// Populated slot index and a borrow of its value.
    pub case: fn(&dyn Any) -> Result<(usize, &dyn Any), CodecError>,
    pub build: fn(usize, Box<dyn Any>) -> Result<Box<dyn Any>, CodecError>,
}

pub(crate) fn downcast_ref<T: Any>(value: &dyn Any) -> Result<&T, CodecError> {
    value.downcast_ref::<T>().ok_or(CodecError::TypeMismatch {
        expected: std::any::type_name::<T>(),
    })
}

pub(crate) fn downcast_box<T: Any>(value: Box<dyn Any>) -> Result<T, CodecError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| CodecError::TypeMismatch {
            expected: std::any::type_name::<T>(),
        })
}
