use sumwire_codec::{
    decode_from_json, decode_from_tokens, encode_to_json, encode_to_tokens, Serializer,
};
use sumwire_containers::{ExceptionFault, Fault, Maybe, Outcome, Success, Union2, Union3, Union4};
use sumwire_tokens::{RawValue, Token};

#[derive(Debug, thiserror::Error)]
#[error("boom")]
struct Boom;

#[test]
fn outcome_ok_roundtrip() {
    let serializer = Serializer::with_containers();
    let tokens = encode_to_tokens(&serializer, &Outcome::ok(5i32)).expect("encode");
    let back: Outcome<i32> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert!(back.is_success());
    assert_eq!(back.value(), Some(&5));
    assert!(back.faults().is_empty());
    assert!(back.successes().is_empty());
}

#[test]
fn outcome_fail_roundtrip() {
    let serializer = Serializer::with_containers();
    let outcome = Outcome::<i32>::fail(Fault::new("e1"));
    let tokens = encode_to_tokens(&serializer, &outcome).expect("encode");
    let back: Outcome<i32> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert!(back.is_failed());
    assert_eq!(back.value(), None);
    assert_eq!(back.faults().len(), 1);
    assert_eq!(back.faults()[0].message(), "e1");
}

#[test]
fn outcome_keeps_success_reasons_on_both_variants() {
    let serializer = Serializer::with_containers();

    let ok = Outcome::ok_with(
        "payload".to_owned(),
        vec![Success::new("cache hit").with_tag("node", "a1")],
    );
    let tokens = encode_to_tokens(&serializer, &ok).expect("encode");
    let back: Outcome<String> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert_eq!(back.successes().len(), 1);
    assert_eq!(back.successes()[0].message(), "cache hit");
    assert_eq!(
        back.successes()[0].tags().get("node"),
        Some(&RawValue::Str("a1".to_owned()))
    );

    let failed = Outcome::<String>::fail_with(
        vec![Fault::new("late failure").into()],
        vec![Success::new("step one done")],
    )
    .expect("construct");
    let tokens = encode_to_tokens(&serializer, &failed).expect("encode");
    let back: Outcome<String> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert!(back.is_failed());
    assert_eq!(back.successes().len(), 1);
}

#[test]
fn exception_fault_decodes_as_base_kind() {
    let serializer = Serializer::with_containers();
    let outcome = Outcome::<i32>::fail(ExceptionFault::new(Boom).with_tag("op", "sync"));
    let tokens = encode_to_tokens(&serializer, &outcome).expect("encode");
    let back: Outcome<i32> = decode_from_tokens(&serializer, &tokens).expect("decode");
    let fault = &back.faults()[0];
    assert_eq!(fault.kind_name(), "fault");
    assert_eq!(fault.message(), "boom");
    assert_eq!(fault.tags().get("op"), Some(&RawValue::Str("sync".to_owned())));
    assert!(fault.as_any().downcast_ref::<ExceptionFault>().is_none());
    assert!(fault.as_any().downcast_ref::<Fault>().is_some());
}

#[test]
fn maybe_absent_omits_value_property() {
    let serializer = Serializer::with_containers();
    let tokens = encode_to_tokens(&serializer, &Maybe::<i32>::absent()).expect("encode");
    assert!(!tokens
        .iter()
        .any(|token| matches!(token, Token::Key(key) if key == "value")));
}

#[test]
fn maybe_present_null_is_distinguishable_from_absent() {
    let serializer = Serializer::with_containers();

    let present_null: Maybe<Option<i32>> = Maybe::present(None);
    let text = encode_to_json(&serializer, &present_null).expect("encode");
    assert_eq!(text, r#"{"hasValue":true,"value":null}"#);
    let back: Maybe<Option<i32>> = decode_from_json(&serializer, &text).expect("decode");
    assert_eq!(back, Maybe::Present(None));

    let absent: Maybe<Option<i32>> = Maybe::absent();
    let text = encode_to_json(&serializer, &absent).expect("encode");
    assert_eq!(text, r#"{"hasValue":false}"#);
    let back: Maybe<Option<i32>> = decode_from_json(&serializer, &text).expect("decode");
    assert_eq!(back, Maybe::Absent);
}

#[test]
fn union_roundtrip_matrix() {
    let serializer = Serializer::with_containers();

    let u2: Union2<i32, String> = Union2::Second("x".to_owned());
    let tokens = encode_to_tokens(&serializer, &u2).expect("encode");
    let back: Union2<i32, String> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert_eq!(back, u2);

    let u4: Union4<bool, i32, String, f64> = Union4::Fourth(2.5);
    let tokens = encode_to_tokens(&serializer, &u4).expect("encode");
    let back: Union4<bool, i32, String, f64> =
        decode_from_tokens(&serializer, &tokens).expect("decode");
    assert_eq!(back, u4);
}

#[test]
fn union_with_identical_alternatives_respects_index() {
    // All three slots are structurally identical; only the index may decide.
    let serializer = Serializer::with_containers();
    let union: Union3<i32, i32, i32> = Union3::Second(9);
    let tokens = encode_to_tokens(&serializer, &union).expect("encode");
    let back: Union3<i32, i32, i32> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert_eq!(back.index(), 1);
    assert_eq!(back.second(), Some(&9));
    assert_eq!(back.first(), None);
    assert_eq!(back.third(), None);
}

#[test]
fn nested_containers_roundtrip() {
    let serializer = Serializer::with_containers();
    let value: Outcome<Maybe<Union2<i32, String>>> =
        Outcome::ok(Maybe::present(Union2::First(7)));
    let text = encode_to_json(&serializer, &value).expect("encode");
    let back: Outcome<Maybe<Union2<i32, String>>> =
        decode_from_json(&serializer, &text).expect("decode");
    assert!(back.is_success());
    assert_eq!(
        back.value(),
        Some(&Maybe::Present(Union2::First(7)))
    );
}

#[test]
fn vector_elements_roundtrip() {
    let serializer = Serializer::with_containers();
    let value: Outcome<Vec<i64>> = Outcome::ok(vec![1, 2, 3]);
    let tokens = encode_to_tokens(&serializer, &value).expect("encode");
    let back: Outcome<Vec<i64>> = decode_from_tokens(&serializer, &tokens).expect("decode");
    assert_eq!(back.value(), Some(&vec![1, 2, 3]));
}

#[test]
fn json_text_shape_is_stable() {
    let serializer = Serializer::with_containers();

    let ok = Outcome::ok(5i32);
    assert_eq!(
        encode_to_json(&serializer, &ok).expect("encode"),
        r#"{"isSuccess":true,"value":5,"errors":[],"successes":[]}"#
    );

    let failed = Outcome::<i32>::fail(Fault::new("e1"));
    assert_eq!(
        encode_to_json(&serializer, &failed).expect("encode"),
        r#"{"isSuccess":false,"errors":[{"type":"fault","message":"e1","tags":{}}],"successes":[]}"#
    );

    let union: Union2<i32, String> = Union2::First(1);
    assert_eq!(
        encode_to_json(&serializer, &union).expect("encode"),
        r#"{"index":0,"value":1}"#
    );
}
