use std::any::Any;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use sumwire_tokens::RawValue;

/// Open tag map attached to a reason. Insertion order is irrelevant.
///
/// Tag values are untyped trees: their original static types cannot be
/// recovered from the wire, so they are not given static types in memory
/// either.
pub type TagMap = BTreeMap<String, RawValue>;

/// Annotation attached to a successful outcome (or accrued before a later
/// failure).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Success {
    message: String,
    tags: TagMap,
}

impl Success {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tags: TagMap::new(),
        }
    }

    pub fn from_parts(message: String, tags: TagMap) -> Self {
        Self { message, tags }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    pub fn kind_name(&self) -> &'static str {
        "success"
    }
}

/// A reason attached to a failed outcome.
///
/// Concrete kinds may carry richer in-memory behavior (see
/// [`ExceptionFault`]), but on the wire every fault is message plus tags.
/// Decoding always reconstitutes the base [`Fault`] kind.
pub trait FaultReason: fmt::Debug + Send + Sync + 'static {
    /// Declared kind name, written to the wire for informational purposes.
    fn kind_name(&self) -> &'static str;
    fn message(&self) -> &str;
    fn tags(&self) -> &TagMap;
    fn as_any(&self) -> &dyn Any;
}

impl<F: FaultReason> From<F> for Box<dyn FaultReason> {
    fn from(fault: F) -> Self {
        Box::new(fault)
    }
}

/// Base fault kind: message plus tags, nothing else.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fault {
    message: String,
    tags: TagMap,
}

impl Fault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tags: TagMap::new(),
        }
    }

    pub fn from_parts(message: String, tags: TagMap) -> Self {
        Self { message, tags }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

impl FaultReason for Fault {
    fn kind_name(&self) -> &'static str {
        "fault"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &TagMap {
        &self.tags
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Fault wrapping a source error.
///
/// The source is in-memory behavior only; it does not travel. A round trip
/// through the codec yields a base [`Fault`] with the same message and tags.
#[derive(Debug)]
pub struct ExceptionFault {
    message: String,
    tags: TagMap,
    source: Box<dyn Error + Send + Sync>,
}

impl ExceptionFault {
    pub fn new(source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            message: source.to_string(),
            tags: TagMap::new(),
            source: Box::new(source),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn source(&self) -> &(dyn Error + Send + Sync) {
        self.source.as_ref()
    }
}

impl FaultReason for ExceptionFault {
    fn kind_name(&self) -> &'static str {
        "exception"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &TagMap {
        &self.tags
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
