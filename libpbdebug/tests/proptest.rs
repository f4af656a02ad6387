use libpbdebug::{encode, parse, parse_with_options, Document, Format, NumberPolicy, ParseOptions, Value};
use proptest::prelude::*;

fn field_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

/// Scalars that text output can represent exactly.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12).prop_map(Value::Float),
        "[ -~\n\t]{0,12}".prop_map(Value::String),
        "[A-Z][A-Z0-9_]{0,8}".prop_map(Value::BareWord),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    let leaf = prop::collection::vec((field_name(), scalar()), 0..6)
        .prop_map(|fields| fields.into_iter().collect::<Document>());
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec((field_name(), prop_oneof![scalar(), inner.prop_map(Value::Object)]), 0..5)
            .prop_map(|fields| fields.into_iter().collect::<Document>())
    })
}

proptest! {
    #[test]
    fn whitespace_only_is_empty(input in "[ \t\r\n]{0,40}") {
        let parsed = parse(&input).unwrap();
        prop_assert!(parsed.document.is_empty());
        prop_assert!(parsed.is_complete());
    }

    #[test]
    fn lenient_parse_never_fails(input in "[a-z0-9 :{}\"\\\\.eE+\\-\n]{0,80}") {
        // Under 128 braces, so only malformed numbers could fail.
        let options = ParseOptions::new().number_policy(NumberPolicy::Null);
        prop_assert!(parse_with_options(&input, &options).is_ok());
    }

    #[test]
    fn arbitrary_input_does_not_panic(input in "\\PC{0,60}") {
        let _ = parse(&input);
    }

    #[test]
    fn text_output_reparses(doc in document()) {
        let expected = encode(&doc, Format::Json);
        for format in [Format::Text, Format::ShortText] {
            let text = encode(&doc, format);
            let parsed = parse(&text).unwrap();
            prop_assert!(parsed.is_complete(), "{:?}: {:?}", text, parsed.recoveries);
            prop_assert_eq!(encode(&parsed.document, Format::Json), expected.clone());
        }
    }
}
