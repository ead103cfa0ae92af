//! Outcome converter.

use std::any::Any;

use sumwire_containers::{FaultReason, Outcome, Success};
use sumwire_tokens::{RawValue, TokenReader, TokenWriter};

use crate::constants::{ERRORS, IS_SUCCESS, SUCCESSES, VALUE};
use crate::descriptor::{
    downcast_box, downcast_ref, Family, OutcomeParts, OutcomeShape, TypeDescriptor, WireType,
};
use crate::error::{CodecError, FormatError};
use crate::reasons;
use crate::serializer::{Converter, Serializer};

/// Converter for one concrete `Outcome<T>` instantiation.
pub struct OutcomeConverter {
    shape: OutcomeShape,
}

impl OutcomeConverter {
    pub(crate) fn new(shape: OutcomeShape) -> Self {
        Self { shape }
    }
}

impl Converter for OutcomeConverter {
    fn encode(
        &self,
        value: &dyn Any,
        writer: &mut TokenWriter,
        serializer: &Serializer,
        depth: usize,
    ) -> Result<(), CodecError> {
        let parts = (self.shape.parts)(value)?;
        writer.write_obj_start();
        writer.write_key(IS_SUCCESS);
        writer.write_bool(parts.is_success);
        if parts.is_success {
            // The value slot is written only when successful; a failed
            // outcome has no value slot at all.
            let element = parts
                .value
                .ok_or(CodecError::Format(FormatError::MissingValue))?;
            writer.write_key(VALUE);
            serializer.encode_dyn(&(self.shape.value_type)(), element, writer, depth + 1)?;
        }
        writer.write_key(ERRORS);
        writer.write_arr_start();
        for fault in parts.faults {
            reasons::write_fault(writer, fault.as_ref())?;
        }
        writer.write_arr_end();
        writer.write_key(SUCCESSES);
        writer.write_arr_start();
        for success in parts.successes {
            reasons::write_success(writer, success)?;
        }
        writer.write_arr_end();
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
        let mut is_success: Option<bool> = None;
        let mut raw_value: Option<RawValue> = None;
        let mut faults: Vec<Box<dyn FaultReason>> = Vec::new();
        let mut successes: Vec<Success> = Vec::new();
        while let Some(key) = reader.next_key().map_err(FormatError::from)? {
            match key {
                IS_SUCCESS => {
                    is_success = Some(reader.read_bool().map_err(FormatError::from)?);
                }
                VALUE => {
                    // Buffered untyped: the value may arrive before the
                    // discriminant, and is discarded when the object turns
                    // out to be failed.
                    raw_value = Some(reader.read_raw().map_err(FormatError::from)?);
                }
                ERRORS => faults = reasons::read_faults(reader)?,
                SUCCESSES => successes = reasons::read_successes(reader)?,
                _ => reader.skip_value().map_err(FormatError::from)?,
            }
        }
        let is_success = is_success.ok_or(FormatError::MissingDiscriminant {
            property: IS_SUCCESS,
        })?;
        if is_success {
            let raw = raw_value.ok_or(FormatError::MissingValue)?;
            let tokens = raw.to_tokens().map_err(FormatError::from)?;
            let mut value_reader = TokenReader::new(&tokens);
            let boxed = serializer.decode_dyn(
                &(self.shape.value_type)(),
                &mut value_reader,
                depth + 1,
            )?;
            (self.shape.build)(Some(boxed), faults, successes)
        } else {
            if faults.is_empty() {
                return Err(FormatError::FailedWithoutErrors.into());
            }
            // A stray value property on a failed object is dropped: the
            // discriminant wins, mirroring the maybe converter's leniency.
            (self.shape.build)(None, faults, successes)
        }
    }
}

impl<T: WireType> WireType for Outcome<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::container::<Self>(Family::Outcome(OutcomeShape {
            value_type: T::descriptor,
            parts: outcome_parts::<T>,
            build: build_outcome::<T>,
        }))
    }
}

fn outcome_parts<T: WireType>(value: &dyn Any) -> Result<OutcomeParts<'_>, CodecError> {
    let outcome = downcast_ref::<Outcome<T>>(value)?;
    Ok(OutcomeParts {
        is_success: outcome.is_success(),
        value: outcome.value().map(|v| v as &dyn Any),
        faults: outcome.faults(),
        successes: outcome.successes(),
    })
}

fn build_outcome<T: WireType>(
    value: Option<Box<dyn Any>>,
    faults: Vec<Box<dyn FaultReason>>,
    successes: Vec<Success>,
) -> Result<Box<dyn Any>, CodecError> {
    let value = match value {
        Some(boxed) => Some(downcast_box::<T>(boxed)?),
        None => None,
    };
    let outcome = Outcome::from_parts(value, faults, successes)?;
    Ok(Box::new(outcome))
}
