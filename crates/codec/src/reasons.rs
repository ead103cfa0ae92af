//! Reason codec, shared by the outcome converter.
//!
//! A reason travels as `{type, message, tags}`. The `type` property records
//! the concrete kind name for readers of the payload; decode reads it and
//! discards it — every decoded fault is reconstituted as the base
//! [`Fault`] kind, never the original concrete subtype. That loss is a
//! documented contract of the format, not an accident.

use sumwire_containers::{Fault, FaultReason, Success, TagMap};
use sumwire_tokens::{TokenReader, TokenWriter};

use crate::constants::{MESSAGE, TAGS, TYPE};
use crate::error::FormatError;

pub(crate) fn write_fault(
    writer: &mut TokenWriter,
    fault: &dyn FaultReason,
) -> Result<(), FormatError> {
    write_reason(writer, fault.kind_name(), fault.message(), fault.tags())
}

pub(crate) fn write_success(
    writer: &mut TokenWriter,
    success: &Success,
) -> Result<(), FormatError> {
    write_reason(writer, success.kind_name(), success.message(), success.tags())
}

fn write_reason(
    writer: &mut TokenWriter,
    kind: &str,
    message: &str,
    tags: &TagMap,
) -> Result<(), FormatError> {
    writer.write_obj_start();
    writer.write_key(TYPE);
    writer.write_str(kind);
    writer.write_key(MESSAGE);
    writer.write_str(message);
    writer.write_key(TAGS);
    writer.write_obj_start();
    for (key, value) in tags {
        writer.write_key(key.as_str());
        value.write_into(writer)?;
    }
    writer.write_obj_end();
    writer.write_obj_end();
    Ok(())
}

pub(crate) fn read_fault(reader: &mut TokenReader<'_>) -> Result<Fault, FormatError> {
    let (message, tags) = read_reason(reader)?;
    Ok(Fault::from_parts(message, tags))
}

pub(crate) fn read_success(reader: &mut TokenReader<'_>) -> Result<Success, FormatError> {
    let (message, tags) = read_reason(reader)?;
    Ok(Success::from_parts(message, tags))
}

pub(crate) fn read_faults(
    reader: &mut TokenReader<'_>,
) -> Result<Vec<Box<dyn FaultReason>>, FormatError> {
    reader.expect_arr_start()?;
    let mut faults: Vec<Box<dyn FaultReason>> = Vec::new();
    while reader.arr_has_next()? {
        faults.push(Box::new(read_fault(reader)?));
    }
    Ok(faults)
}

pub(crate) fn read_successes(
    reader: &mut TokenReader<'_>,
) -> Result<Vec<Success>, FormatError> {
    reader.expect_arr_start()?;
    let mut successes = Vec::new();
    while reader.arr_has_next()? {
        successes.push(read_success(reader)?);
    }
    Ok(successes)
}

fn read_reason(reader: &mut TokenReader<'_>) -> Result<(String, TagMap), FormatError> {
    reader.expect_obj_start()?;
    let mut message: Option<String> = None;
    let mut tags = TagMap::new();
    while let Some(key) = reader.next_key()? {
        match key {
            // Informational only; subtype identity does not survive decode.
            TYPE => reader.skip_value()?,
            MESSAGE => message = Some(reader.read_str()?.to_owned()),
            TAGS => tags = read_tags(reader)?,
            _ => reader.skip_value()?,
        }
    }
    let message = message.ok_or(FormatError::MissingProperty { property: MESSAGE })?;
    Ok((message, tags))
}

fn read_tags(reader: &mut TokenReader<'_>) -> Result<TagMap, FormatError> {
    reader.expect_obj_start()?;
    let mut tags = TagMap::new();
    while let Some(key) = reader.next_key()? {
        let key = key.to_owned();
        // Tag values stay untyped; their static types are not recoverable.
        tags.insert(key, reader.read_raw()?);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumwire_containers::ExceptionFault;
    use sumwire_tokens::RawValue;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    fn roundtrip_fault(fault: &dyn FaultReason) -> Fault {
        let mut writer = TokenWriter::new();
        write_fault(&mut writer, fault).expect("write");
        let tokens = writer.into_tokens();
        let mut reader = TokenReader::new(&tokens);
        read_fault(&mut reader).expect("read")
    }

    #[test]
    fn fault_roundtrip_keeps_message_and_tags() {
        let fault = Fault::new("e1").with_tag("code", 404);
        let back = roundtrip_fault(&fault);
        assert_eq!(back.message(), "e1");
        assert_eq!(back.tags().get("code"), Some(&RawValue::Int(404)));
    }

    #[test]
    fn exception_fault_decodes_as_base_kind() {
        let fault = ExceptionFault::new(Boom).with_tag("op", "sync");
        let back = roundtrip_fault(&fault);
        assert_eq!(back.kind_name(), "fault");
        assert_eq!(back.message(), "boom");
        assert_eq!(back.tags().get("op"), Some(&RawValue::Str("sync".to_owned())));
        assert!(back.as_any().downcast_ref::<ExceptionFault>().is_none());
    }

    #[test]
    fn reason_without_message_is_rejected() {
        let mut writer = TokenWriter::new();
        writer.write_obj_start();
        writer.write_key(TYPE);
        writer.write_str("fault");
        writer.write_obj_end();
        let tokens = writer.into_tokens();
        let mut reader = TokenReader::new(&tokens);
        assert_eq!(
            read_fault(&mut reader),
            Err(FormatError::MissingProperty { property: MESSAGE })
        );
    }

    #[test]
    fn unknown_reason_properties_are_skipped() {
        let mut writer = TokenWriter::new();
        writer.write_obj_start();
        writer.write_key("future");
        writer.write_obj_start();
        writer.write_key("x");
        writer.write_int(1);
        writer.write_obj_end();
        writer.write_key(MESSAGE);
        writer.write_str("m");
        writer.write_obj_end();
        let tokens = writer.into_tokens();
        let mut reader = TokenReader::new(&tokens);
        let fault = read_fault(&mut reader).expect("read");
        assert_eq!(fault.message(), "m");
        assert!(fault.tags().is_empty());
    }
}
