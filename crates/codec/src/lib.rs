//! Wire codec for sumwire containers.
//!
//! Serializes and deserializes arbitrary instantiations of the generic
//! container families ([`Outcome`](sumwire_containers::Outcome),
//! [`Maybe`](sumwire_containers::Maybe), unions of arity 2..4) over the
//! token stream primitives, without field-by-field structural reflection.
//!
//! The [`Serializer`] dispatches at runtime on a value's [`TypeDescriptor`]:
//! the installed converter factories recognize the container families and
//! produce a converter bound to the concrete element types; everything else
//! falls back to the type's own leaf codec. Container payloads carry an
//! explicit discriminant on the wire (`isSuccess`, `hasValue`, `index`) —
//! the containers themselves are not self-describing.
//!
//! Decode is atomic: it either returns a fully valid container or fails
//! with a [`FormatError`]; no partially valid value is ever observable.

pub mod constants;
mod convert;
mod descriptor;
mod dispatch;
mod error;
mod leaves;
mod reasons;
mod serializer;
mod shared;

pub use convert::{MaybeConverter, OutcomeConverter, UnionConverter};
pub use descriptor::{
    Family, LeafCodec, MaybeShape, OutcomeParts, OutcomeShape, TypeDescriptor, UnionShape,
    WireType,
};
pub use dispatch::{register_containers, MaybeFactory, OutcomeFactory, UnionFactory};
pub use error::{CodecError, FormatError};
pub use serializer::{Converter, ConverterFactory, Serializer, DEFAULT_MAX_DEPTH};
pub use shared::{decode_from_json, decode_from_tokens, encode_to_json, encode_to_tokens};
