//! Token stream primitives for sumwire.
//!
//! A serialized payload is modeled as a forward-only sequence of structural
//! tokens (object/array markers, property keys, scalars). Codecs read and
//! write tokens; the [`json_text`] module maps token streams to and from
//! actual JSON text.

mod error;
pub mod json_text;
mod raw;
mod reader;
mod token;
mod writer;

pub use error::TokenError;
pub use json_text::{from_json_text, to_json_text, JsonTextError};
pub use raw::{RawValue, MAX_DEPTH};
pub use reader::TokenReader;
pub use token::Token;
pub use writer::TokenWriter;
