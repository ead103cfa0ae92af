//! The generic value serializer.
//!
//! Holds the installed converter factories and routes every value — top
//! level or nested element — through them. Factories hold no mutable state;
//! a `Serializer` is safe to share across threads as long as each call owns
//! its own reader/writer.

use std::any::Any;

use sumwire_tokens::{TokenReader, TokenWriter};

use crate::descriptor::{downcast_box, Family, TypeDescriptor, WireType};
use crate::error::{CodecError, FormatError};

/// Default bound on nested-element recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A converter bound to one concrete container instantiation.
pub trait Converter: Send + Sync {
    fn encode(
        &self,
        value: &dyn Any,
        writer: &mut TokenWriter,
        serializer: &Serializer,
        depth: usize,
    ) -> Result<(), CodecError>;

    fn decode(
        &self,
        reader: &mut TokenReader<'_>,
        serializer: &Serializer,
        depth: usize,
    ) -> Result<Box<dyn Any>, CodecError>;
}

/// Recognizes a family of type descriptors and produces converters for them.
///
/// Pure and stateless: `can_handle` and `create` are functions of the
/// descriptor alone, and repeated calls for the same descriptor are
/// behaviorally idempotent.
pub trait ConverterFactory: Send + Sync {
    fn can_handle(&self, descriptor: &TypeDescriptor) -> bool;

    /// Converter bound to the descriptor's element types, or
    /// [`CodecError::UnsupportedType`] for a shape this factory does not
    /// recognize.
    fn create(&self, descriptor: &TypeDescriptor) -> Result<Box<dyn Converter>, CodecError>;
}

pub struct Serializer {
    factories: Vec<Box<dyn ConverterFactory>>,
    max_depth: usize,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    /// Serializer with no converter factories installed. Container types are
    /// rejected until a registration call installs their factories.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn add_factory(&mut self, factory: Box<dyn ConverterFactory>) {
        self.factories.push(factory);
    }

    pub fn encode<T: WireType>(
        &self,
        value: &T,
        writer: &mut TokenWriter,
    ) -> Result<(), CodecError> {
        self.encode_dyn(&T::descriptor(), value, writer, 0)
    }

    pub fn decode<T: WireType>(&self, reader: &mut TokenReader<'_>) -> Result<T, CodecError> {
        let boxed = self.decode_dyn(&T::descriptor(), reader, 0)?;
        downcast_box::<T>(boxed)
    }

    /// Erased encode entry point; converters re-enter here for every nested
    /// element payload.
    pub fn encode_dyn(
        &self,
        descriptor: &TypeDescriptor,
        value: &dyn Any,
        writer: &mut TokenWriter,
        depth: usize,
    ) -> Result<(), CodecError> {
        if depth > self.max_depth {
            return Err(FormatError::DepthExceeded(self.max_depth).into());
        }
        if let Some(factory) = self.factories.iter().find(|f| f.can_handle(descriptor)) {
            return factory
                .create(descriptor)?
                .encode(value, writer, self, depth);
        }
        match descriptor.family() {
            Family::Leaf(codec) => (codec.encode)(value, writer, self, depth),
            _ => Err(CodecError::UnsupportedType {
                type_name: descriptor.type_name(),
            }),
        }
    }

    /// Erased decode entry point; converters re-enter here for every nested
    /// element payload.
    pub fn decode_dyn(
        &self,
        descriptor: &TypeDescriptor,
        reader: &mut TokenReader<'_>,
        depth: usize,
    ) -> Result<Box<dyn Any>, CodecError> {
        if depth > self.max_depth {
            return Err(FormatError::DepthExceeded(self.max_depth).into());
        }
        if let Some(factory) = self.factories.iter().find(|f| f.can_handle(descriptor)) {
            return factory.create(descriptor)?.decode(reader, self, depth);
        }
        match descriptor.family() {
            Family::Leaf(codec) => (codec.decode)(reader, self, depth),
            _ => Err(CodecError::UnsupportedType {
                type_name: descriptor.type_name(),
            }),
        }
    }
}
