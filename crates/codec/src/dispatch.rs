//! Dispatch registry: the three converter factories and the registration
//! entry point that installs them into a serializer.

use crate::convert::{MaybeConverter, OutcomeConverter, UnionConverter};
use crate::descriptor::{Family, TypeDescriptor};
use crate::error::CodecError;
use crate::serializer::{Converter, ConverterFactory, Serializer};

/// Recognizes `Outcome<T>` instantiations.
pub struct OutcomeFactory;

impl ConverterFactory for OutcomeFactory {
    fn can_handle(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor.family(), Family::Outcome(_))
    }

    fn create(&self, descriptor: &TypeDescriptor) -> Result<Box<dyn Converter>, CodecError> {
        match descriptor.family() {
            Family::Outcome(shape) => Ok(Box::new(OutcomeConverter::new(*shape))),
            _ => Err(CodecError::UnsupportedType {
                type_name: descriptor.type_name(),
            }),
        }
    }
}

/// Recognizes `Maybe<T>` instantiations.
pub struct MaybeFactory;

impl ConverterFactory for MaybeFactory {
    fn can_handle(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor.family(), Family::Maybe(_))
    }

    fn create(&self, descriptor: &TypeDescriptor) -> Result<Box<dyn Converter>, CodecError> {
        match descriptor.family() {
            Family::Maybe(shape) => Ok(Box::new(MaybeConverter::new(*shape))),
            _ => Err(CodecError::UnsupportedType {
                type_name: descriptor.type_name(),
            }),
        }
    }
}

/// Recognizes union instantiations of arity 2 through 4.
pub struct UnionFactory;

impl ConverterFactory for UnionFactory {
    fn can_handle(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor.family(), Family::Union(shape) if (2..=4).contains(&shape.arity))
    }

    fn create(&self, descriptor: &TypeDescriptor) -> Result<Box<dyn Converter>, CodecError> {
        match descriptor.family() {
            Family::Union(shape) if (2..=4).contains(&shape.arity) => {
                Ok(Box::new(UnionConverter::new(*shape)))
            }
            _ => Err(CodecError::UnsupportedType {
                type_name: descriptor.type_name(),
            }),
        }
    }
}

/// Installs the three container factories into a host serializer.
///
/// The only wiring the rest of an application needs.
pub fn register_containers(serializer: &mut Serializer) {
    serializer.add_factory(Box::new(OutcomeFactory));
    serializer.add_factory(Box::new(MaybeFactory));
    serializer.add_factory(Box::new(UnionFactory));
}

impl Serializer {
    /// Serializer with the container factories pre-installed.
    pub fn with_containers() -> Self {
        let mut serializer = Self::new();
        register_containers(&mut serializer);
        serializer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::WireType;
    use sumwire_containers::{Maybe, Outcome, Union2};

    #[test]
    fn factories_recognize_their_family_only() {
        let outcome = Outcome::<i32>::descriptor();
        let maybe = Maybe::<i32>::descriptor();
        let union = Union2::<i32, bool>::descriptor();
        let leaf = i32::descriptor();

        assert!(OutcomeFactory.can_handle(&outcome));
        assert!(!OutcomeFactory.can_handle(&maybe));
        assert!(!OutcomeFactory.can_handle(&leaf));

        assert!(MaybeFactory.can_handle(&maybe));
        assert!(!MaybeFactory.can_handle(&union));

        assert!(UnionFactory.can_handle(&union));
        assert!(!UnionFactory.can_handle(&outcome));
        assert!(!UnionFactory.can_handle(&leaf));
    }

    #[test]
    fn create_rejects_foreign_shapes() {
        let leaf = i32::descriptor();
        assert!(matches!(
            OutcomeFactory.create(&leaf),
            Err(CodecError::UnsupportedType { .. })
        ));
        assert!(matches!(
            UnionFactory.create(&leaf),
            Err(CodecError::UnsupportedType { .. })
        ));
    }
}
