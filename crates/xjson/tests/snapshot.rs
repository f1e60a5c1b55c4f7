#![expect(missing_docs)]

use xjson::Value;

#[test]
fn snapshot_serialized_document() {
    let (v, _) = Value::parse(
        br#"{"ver":123,"o":null,"flag":true,"data":[[0,0.1,130]],"s":"a\"b"}"#,
        false,
    )
    .unwrap();
    insta::assert_snapshot!(v.to_json_string(), @r#"{"data":[[0,0.1,130]],"flag":true,"o":null,"s":"a\"b","ver":123}"#);
}

#[test]
fn wide_output_escapes_non_ascii_and_splits_astral() {
    let v = Value::borrowed("caf\u{e9} \u{23350}");
    let wide = v.to_utf16();
    let narrow_view: String = wide.iter().map(|&u| u as u8 as char).collect();
    let expected = "\"caf\\u00e9 \\ud84c\\udf50\"";
    assert_eq!(narrow_view, expected);
}
